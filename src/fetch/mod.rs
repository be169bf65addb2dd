//! Remote list fetching: state machine, sources, and render policy.

mod error;
mod fetcher;
mod intent;
mod reducer;
mod source;
mod state;
mod view;

pub use error::FetchError;
pub use fetcher::RemoteListFetcher;
pub use intent::FetchIntent;
pub use reducer::FetchReducer;
pub use source::{HttpListSource, ListSource};
pub use state::{FetchState, FetchStatus};
pub use view::{can_reload, render_policy, FetchView, DEFAULT_MAX_ITEMS};
