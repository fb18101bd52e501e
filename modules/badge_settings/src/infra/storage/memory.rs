//! In-memory store implementations

use crate::contract::SettingsRecord;
use crate::domain::repository::{OptionsStore, TransientStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

// ===== Options Store =====

#[derive(Clone, Default)]
pub struct InMemoryOptionsStore {
    data: Arc<RwLock<HashMap<String, SettingsRecord>>>,
}

impl InMemoryOptionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record without going through validation
    pub fn insert(&self, key: impl Into<String>, record: SettingsRecord) {
        self.data.write().insert(key.into(), record);
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl OptionsStore for InMemoryOptionsStore {
    async fn load(&self, key: &str) -> Result<Option<SettingsRecord>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn save(&self, key: &str, record: &SettingsRecord) -> Result<()> {
        self.data.write().insert(key.to_string(), record.clone());
        Ok(())
    }
}

// ===== Transient Store =====

/// Cached value with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientEntry {
    pub value: String,
    pub ttl: Duration,
    pub expires_at: DateTime<Utc>,
}

impl TransientEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTransientStore {
    data: Arc<RwLock<HashMap<String, TransientEntry>>>,
}

impl InMemoryTransientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry, including expired ones
    pub fn entry(&self, key: &str) -> Option<TransientEntry> {
        self.data.read().get(key).cloned()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|_, entry| !entry.is_expired(now));
        before - data.len()
    }
}

#[async_trait]
impl TransientStore for InMemoryTransientStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .data
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = Utc::now() + chrono::Duration::from_std(ttl)?;
        self.data.write().insert(
            key.to_string(),
            TransientEntry {
                value: value.to_string(),
                ttl,
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_options_roundtrip() {
        let store = InMemoryOptionsStore::new();
        assert!(store.load("badgeos_settings").await.unwrap().is_none());

        let record = SettingsRecord {
            minimum_role: Some("publish_posts".to_string()),
            ..Default::default()
        };
        store.save("badgeos_settings", &record).await.unwrap();

        assert_eq!(store.load("badgeos_settings").await.unwrap(), Some(record));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_transient_hit() {
        let store = InMemoryTransientStore::new();
        store
            .set("feed", "<div>X</div>", Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(store.get("feed").await.unwrap().as_deref(), Some("<div>X</div>"));
        let entry = store.entry("feed").unwrap();
        assert_eq!(entry.ttl, Duration::from_secs(3600));
        assert!(entry.expires_at > Utc::now() + chrono::Duration::seconds(3500));
    }

    #[tokio::test]
    async fn test_transient_expired() {
        let store = InMemoryTransientStore::new();
        store.set("feed", "stale", Duration::ZERO).await.unwrap();

        assert!(store.get("feed").await.unwrap().is_none());
        assert_eq!(store.purge_expired(), 1);
        assert!(store.entry("feed").is_none());
    }
}
