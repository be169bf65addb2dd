//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (button presses, text edits) or
/// completions of async work (a fetch finished, a timer fired).
pub trait Intent: Send + 'static {}
