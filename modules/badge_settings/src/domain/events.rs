//! Domain events for the badge settings service
//!
//! Events let add-ons and the plugin's own logger react to changes without
//! taking part in validation:
//! - Settings saved: after a validated record has been persisted
//! - Feed refreshed / fetch failed: after a cache-miss fetch of the add-ons feed

use crate::contract::{SettingsRecord, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Domain event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SettingsEvent {
    /// Settings record was validated and stored
    SettingsSaved(SettingsSavedEvent),
    /// Add-ons feed was fetched and cached
    FeedRefreshed(FeedRefreshedEvent),
    /// Add-ons feed fetch failed
    FeedFetchFailed(FeedFetchFailedEvent),
}

/// Event data for a settings save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSavedEvent {
    /// Options key the record was stored under
    pub option_key: String,
    /// Whether data will be deleted on uninstall after this save
    pub remove_data_on_uninstall: bool,
    /// Add-on slugs with a stored license key
    pub licensed_slugs: Vec<String>,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
    /// User who saved the settings (if known)
    pub user_id: Option<u64>,
}

/// Event data for a feed refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRefreshedEvent {
    pub url: String,
    /// Size of the cached markup in bytes
    pub bytes: usize,
    pub timestamp: DateTime<Utc>,
}

/// Event data for a failed feed fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedFetchFailedEvent {
    pub url: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for settings events
///
/// Failures are logged by the caller and never fail the operation.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: SettingsEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: SettingsEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

impl SettingsEvent {
    /// Create a new SettingsSaved event
    pub fn saved(option_key: &str, record: &SettingsRecord, user_id: Option<UserId>) -> Self {
        SettingsEvent::SettingsSaved(SettingsSavedEvent {
            option_key: option_key.to_string(),
            remove_data_on_uninstall: record.remove_data_on_uninstall(),
            licensed_slugs: record.licenses.keys().cloned().collect(),
            timestamp: Utc::now(),
            user_id: user_id.map(|u| u.0),
        })
    }

    /// Create a new FeedRefreshed event
    pub fn feed_refreshed(url: String, bytes: usize) -> Self {
        SettingsEvent::FeedRefreshed(FeedRefreshedEvent {
            url,
            bytes,
            timestamp: Utc::now(),
        })
    }

    /// Create a new FeedFetchFailed event
    pub fn feed_fetch_failed(url: String, error: String) -> Self {
        SettingsEvent::FeedFetchFailed(FeedFetchFailedEvent {
            url,
            error,
            timestamp: Utc::now(),
        })
    }
}
