//! Base trait for page state.

/// Marker trait for page state snapshots.
///
/// States are cloned to produce the next state and compared to decide
/// whether a view has anything new to draw.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
