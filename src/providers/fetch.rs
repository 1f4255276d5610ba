use crate::core::error::LookupError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Retrieves the body of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, LookupError>;
}

/// Plain HTTP GET. A failed request is final, there are no retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|source| LookupError::Transport {
                url: "<client setup>".to_string(),
                source,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        debug!("Requesting page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LookupError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(LookupError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(|source| LookupError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
