//! Model-View-Intent primitives shared by every page.
//!
//! ```text
//! Intent --> Reducer --> State --> View
//!   ^                               |
//!   +-------------------------------+
//! ```
//!
//! - **State**: snapshot of everything a widget needs to render
//! - **Intent**: user action or async completion
//! - **Reducer**: pure function from `(State, Intent)` to the next `State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
