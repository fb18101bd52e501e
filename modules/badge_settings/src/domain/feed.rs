//! Add-ons feed retrieval with a single cached slot

use super::events::{EventPublisher, SettingsEvent};
use super::repository::TransientStore;
use crate::config::FeedConfig;
use async_trait::async_trait;

const ENVELOPE_OPEN: &str = "<html><body>";
const ENVELOPE_CLOSE: &str = "</body></html>";

/// Error type for feed retrieval
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Request(String),

    #[error("Feed client could not be built: {0}")]
    Client(String),
}

/// Feed response; any HTTP status counts as a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

/// Source of the remote add-ons markup
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// GET `url` and return the response body
    async fn fetch(&self, url: &str) -> Result<FeedResponse, FeedError>;
}

/// Remove every `<html><body>` / `</body></html>` wrapper from feed markup
pub fn strip_envelope(body: &str) -> String {
    body.replace(ENVELOPE_OPEN, "").replace(ENVELOPE_CLOSE, "")
}

/// Return cached feed markup, fetching and caching it on a miss
///
/// A fetch failure returns the configured error markup without caching it.
/// An empty body is returned as-is and not cached either.
pub async fn get_or_fetch(
    cache: &dyn TransientStore,
    source: &dyn FeedSource,
    events: &dyn EventPublisher,
    config: &FeedConfig,
) -> String {
    match cache.get(&config.cache_key).await {
        Ok(Some(cached)) if !cached.is_empty() => {
            tracing::debug!(key = %config.cache_key, "Add-ons feed cache hit");
            return cached;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(key = %config.cache_key, error = %e, "Failed to read add-ons feed cache");
        }
    }

    tracing::debug!(url = %config.url, "Fetching add-ons feed");
    let response = match source.fetch(&config.url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %config.url, error = %e, "Failed to retrieve add-ons feed");
            publish(
                events,
                SettingsEvent::feed_fetch_failed(config.url.clone(), e.to_string()),
            )
            .await;
            return config.error_message.clone();
        }
    };

    if response.body.is_empty() {
        tracing::debug!(url = %config.url, status = response.status, "Add-ons feed returned an empty body");
        return String::new();
    }

    let feed = strip_envelope(&response.body);
    if let Err(e) = cache.set(&config.cache_key, &feed, config.cache_ttl).await {
        tracing::warn!(key = %config.cache_key, error = %e, "Failed to cache add-ons feed");
    }
    publish(
        events,
        SettingsEvent::feed_refreshed(config.url.clone(), feed.len()),
    )
    .await;

    feed
}

async fn publish(events: &dyn EventPublisher, event: SettingsEvent) {
    if let Err(e) = events.publish(event).await {
        tracing::warn!(error = %e, "Failed to publish settings event");
    }
}
