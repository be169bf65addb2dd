//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place where page state transitions happen.
///
/// Implementations must stay pure: no I/O, no logging of user data, no
/// clocks. Side effects belong to the caller that dispatches the intent.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
