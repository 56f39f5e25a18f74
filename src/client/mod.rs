use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::app::{Result, TouchlineError};

/// Seam for everything that performs an HTTP GET. The pipeline and the
/// syncer only ever see this trait, so tests substitute canned bodies.
#[async_trait]
pub trait Client: Send + Sync {
    async fn get(&self, token: &CancellationToken, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("touchline/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn get(&self, token: &CancellationToken, url: &str) -> Result<Vec<u8>> {
        let response = tokio::select! {
            _ = token.cancelled() => return Err(TouchlineError::Cancelled),
            response = self.client.get(url).send() => {
                response.map_err(TouchlineError::Fetch)?
            }
        };

        let response = response.error_for_status().map_err(TouchlineError::Fetch)?;

        let body = tokio::select! {
            _ = token.cancelled() => return Err(TouchlineError::Cancelled),
            body = response.bytes() => body.map_err(TouchlineError::Read)?,
        };

        Ok(body.to_vec())
    }
}
