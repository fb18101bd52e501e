//! Storage traits for host-provided persistence
//!
//! The host platform owns both stores; this crate only reads and writes
//! through these traits. In-memory implementations live in infra/storage.

use crate::contract::SettingsRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Host options storage holding the settings record under a fixed key
#[async_trait]
pub trait OptionsStore: Send + Sync {
    /// Load the record stored under `key`
    async fn load(&self, key: &str) -> Result<Option<SettingsRecord>>;

    /// Replace the record stored under `key`
    async fn save(&self, key: &str, record: &SettingsRecord) -> Result<()>;
}

/// Host key-value cache with per-entry expiry
#[async_trait]
pub trait TransientStore: Send + Sync {
    /// Get an unexpired value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value that expires after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
