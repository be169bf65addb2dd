//! Where list payloads come from.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

use super::error::FetchError;

/// One network read producing a list of records.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<T>, FetchError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// GET against a fixed endpoint returning a JSON array.
pub struct HttpListSource {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpListSource {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HttpListSource {
    /// Request, status check and body read. Bounded as a whole by
    /// [`ListSource::fetch`].
    async fn get_list<T: DeserializeOwned>(&self) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: self.endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Request {
            url: self.endpoint.clone(),
            source: e,
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> ListSource<T> for HttpListSource {
    /// `timeout_seconds` covers the whole exchange, body included.
    async fn fetch(&self) -> Result<Vec<T>, FetchError> {
        tokio::time::timeout(self.timeout, self.get_list())
            .await
            .map_err(|_| FetchError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
    }

    fn describe(&self) -> String {
        format!("GET {}", self.endpoint)
    }
}
