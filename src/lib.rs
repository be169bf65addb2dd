//! Page-state toolkit for a small tutorial app.
//!
//! The crate models what each page of the course owns: persisted values,
//! an explicit effect lifecycle, memoized derivations, injected context,
//! routing, and a cancellable remote list fetch.

pub mod config;
pub mod context;
pub mod fetch;
pub mod lifecycle;
pub mod logging;
pub mod memo;
pub mod mvi;
pub mod navigation;
pub mod pages;
pub mod storage;

pub use config::{Config, ConfigError};
pub use fetch::{FetchError, FetchState, FetchStatus, RemoteListFetcher};
pub use lifecycle::{CancelScope, EffectHost};
pub use navigation::{Navigate, Navigator, Route};
pub use storage::{PersistentValueStore, StorageError, StoredValue};
