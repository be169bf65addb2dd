//! Remote user list backed by [`RemoteListFetcher`].

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::fetch::{can_reload, FetchState, FetchView, ListSource, RemoteListFetcher};

/// One record of the users payload. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub website: String,
}

impl UserRecord {
    /// First character of the name, shown in the avatar.
    pub fn avatar_initial(&self) -> Option<char> {
        self.name.chars().next()
    }

    pub fn summary(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.website)
    }
}

pub struct ApiPage<S> {
    fetcher: RemoteListFetcher<UserRecord, S>,
    max_items: usize,
}

impl<S: ListSource<UserRecord> + 'static> ApiPage<S> {
    pub fn new(source: S, max_items: usize) -> Self {
        Self {
            fetcher: RemoteListFetcher::new(source),
            max_items,
        }
    }

    pub fn fetcher(&self) -> &RemoteListFetcher<UserRecord, S> {
        &self.fetcher
    }

    /// Mount the page. The first load starts right away.
    pub fn open(&self) -> JoinHandle<()> {
        self.fetcher.mount()
    }

    pub fn close(&self) {
        self.fetcher.unmount();
    }

    /// `None` while a load is running or when the page is closed.
    pub fn reload(&self) -> Option<JoinHandle<()>> {
        if !can_reload(&self.fetcher.snapshot()) {
            return None;
        }
        self.fetcher.reload()
    }

    pub fn state(&self) -> FetchState<UserRecord> {
        self.fetcher.snapshot()
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.fetcher.with_view(self.max_items, |view| match view {
            FetchView::Loading => vec!["Loading...".to_string()],
            FetchView::Error(message) => vec![format!("Error: {message}")],
            FetchView::List(users) => users.iter().map(UserRecord::summary).collect(),
        })
    }
}
