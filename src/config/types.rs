use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fetch::DEFAULT_MAX_ITEMS;
use crate::storage::DEFAULT_QUOTA_BYTES;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// The remote list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GET endpoint returning a JSON array of user records.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// The durable medium behind persisted page state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to `FileMedium::default_path()`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Capacity in bytes (default: 5 MiB).
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Records shown by the list view (default: 5).
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/users".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}
