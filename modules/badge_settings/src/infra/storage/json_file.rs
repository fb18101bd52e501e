//! Options store backed by a single JSON file
//!
//! The file holds one object mapping option keys to stored records.

use super::mapper::{record_from_json, record_to_json};
use crate::contract::SettingsRecord;
use crate::domain::repository::OptionsStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct JsonFileOptionsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileOptionsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("{} does not contain a JSON object", self.path.display()),
        }
    }
}

#[async_trait]
impl OptionsStore for JsonFileOptionsStore {
    async fn load(&self, key: &str) -> Result<Option<SettingsRecord>> {
        let all = self.read_all().await?;
        all.get(key).map(record_from_json).transpose()
    }

    async fn save(&self, key: &str, record: &SettingsRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(key.to_string(), record_to_json(record));
        let body = serde_json::to_string_pretty(&Value::Object(all))?;

        // Write then rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;

        tracing::debug!(key, path = %self.path.display(), "Stored settings record");
        Ok(())
    }
}
