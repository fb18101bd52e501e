//! reqwest-backed add-ons feed source

use crate::config::FeedConfig;
use crate::domain::feed::{FeedError, FeedResponse, FeedSource};
use async_trait::async_trait;

#[derive(Clone)]
pub struct ReqwestFeedSource {
    client: reqwest::Client,
}

impl ReqwestFeedSource {
    /// Build a client honouring the feed's TLS and timeout settings
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!config.verify_tls);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FeedError::Client(e.to_string()))?;

        if !config.verify_tls {
            tracing::warn!(url = %config.url, "TLS certificate verification disabled for add-ons feed");
        }

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for ReqwestFeedSource {
    async fn fetch(&self, url: &str) -> Result<FeedResponse, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        tracing::debug!(url, status, bytes = body.len(), "Fetched add-ons feed");
        Ok(FeedResponse { status, body })
    }
}
