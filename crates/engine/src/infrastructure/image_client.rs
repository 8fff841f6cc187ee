//! HTTP image fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::infrastructure::ports::{ImageFetchError, ImageFetchPort};

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Downloads prize images over HTTP.
#[derive(Clone)]
pub struct HttpImageClient {
    client: Client,
}

impl HttpImageClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for HttpImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageFetchError::RequestFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
