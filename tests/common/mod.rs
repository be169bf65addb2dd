//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use pagestate::config::ApiConfig;
use pagestate::fetch::{FetchError, ListSource};
use pagestate::pages::UserRecord;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// `n` user records in the endpoint's JSON shape.
pub fn users_json(n: u64) -> String {
    let users: Vec<UserRecord> = (1..=n).map(user).collect();
    serde_json::to_string(&users).unwrap()
}

pub fn user(id: u64) -> UserRecord {
    UserRecord {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        website: format!("user{id}.example.com"),
    }
}

pub fn api_config(endpoint: String) -> ApiConfig {
    ApiConfig {
        endpoint,
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    }
}

/// Create a temporary config file with the given TOML body.
pub fn temp_config(body: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, body).expect("Failed to write config");
    (temp_dir, config_path)
}

/// One scripted answer: wait `delay`, then return `result`.
pub struct Step {
    pub delay: Duration,
    pub result: Result<Vec<UserRecord>, String>,
}

impl Step {
    pub fn ok(delay_ms: u64, ids: std::ops::RangeInclusive<u64>) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(ids.map(user).collect()),
        }
    }

    pub fn status(delay_ms: u64, status: u16) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Err(status.to_string()),
        }
    }
}

/// In-process list source replaying a script, one step per call.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    steps: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListSource<UserRecord> for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<UserRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().pop_front().unwrap_or(Step {
            delay: Duration::ZERO,
            result: Ok(Vec::new()),
        });
        tokio::time::sleep(step.delay).await;
        step.result.map_err(|status| FetchError::Status {
            status: status.parse().unwrap_or(500),
        })
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}
