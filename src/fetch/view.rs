//! Which widget a fetch state renders as.

use super::state::{FetchState, FetchStatus};

/// How many records the list view shows, whatever was fetched.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchView<'a, T> {
    Loading,
    Error(&'a str),
    List(&'a [T]),
}

pub fn render_policy<T>(state: &FetchState<T>, max_items: usize) -> FetchView<'_, T> {
    match state.status() {
        FetchStatus::Loading => FetchView::Loading,
        FetchStatus::Error { message } => FetchView::Error(message),
        FetchStatus::Idle | FetchStatus::Success => {
            let shown = state.data().len().min(max_items);
            FetchView::List(&state.data()[..shown])
        }
    }
}

/// The reload button is disabled while an attempt is running.
pub fn can_reload<T>(state: &FetchState<T>) -> bool {
    !state.is_loading()
}
