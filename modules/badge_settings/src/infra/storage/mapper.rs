//! Conversion between the settings record and its stored JSON form
//!
//! The stored form is a single flat JSON object, the same shape the host
//! keeps for the option: core fields and extension fields side by side,
//! license keys nested under `licenses`.

use crate::contract::{fields, SettingsRecord};
use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const LICENSES: &str = "licenses";

pub fn record_to_json(record: &SettingsRecord) -> Value {
    let mut obj = Map::new();

    // Extension fields first so core fields always win on a name clash
    for (key, value) in &record.extra {
        obj.insert(key.clone(), value.clone());
    }

    let scalars = [
        (fields::MINIMUM_ROLE, &record.minimum_role),
        (fields::SUBMISSION_MANAGER_ROLE, &record.submission_manager_role),
        (fields::DEBUG_MODE, &record.debug_mode),
        (fields::LOG_ENTRIES, &record.log_entries),
        (fields::MS_SHOW_ALL_ACHIEVEMENTS, &record.ms_show_all_achievements),
        (fields::REMOVE_DATA_ON_UNINSTALL, &record.remove_data_on_uninstall),
        (fields::SUBMISSION_EMAIL, &record.submission_email),
        (fields::SUBMISSION_EMAIL_ADDRESSES, &record.submission_email_addresses),
    ];
    for (key, value) in scalars {
        match value {
            Some(v) => obj.insert(key.to_string(), Value::String(v.clone())),
            None => obj.remove(key),
        };
    }

    if !record.licenses.is_empty() {
        let licenses: Map<String, Value> = record
            .licenses
            .iter()
            .map(|(slug, key)| (slug.clone(), Value::String(key.clone())))
            .collect();
        obj.insert(LICENSES.to_string(), Value::Object(licenses));
    }

    Value::Object(obj)
}

pub fn record_from_json(value: &Value) -> Result<SettingsRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow!("stored settings must be a JSON object"))?;

    let mut record = SettingsRecord::default();
    for (key, value) in obj {
        match key.as_str() {
            fields::MINIMUM_ROLE => record.minimum_role = scalar(value),
            fields::SUBMISSION_MANAGER_ROLE => record.submission_manager_role = scalar(value),
            fields::DEBUG_MODE => record.debug_mode = scalar(value),
            fields::LOG_ENTRIES => record.log_entries = scalar(value),
            fields::MS_SHOW_ALL_ACHIEVEMENTS => record.ms_show_all_achievements = scalar(value),
            fields::REMOVE_DATA_ON_UNINSTALL => record.remove_data_on_uninstall = scalar(value),
            fields::SUBMISSION_EMAIL => record.submission_email = scalar(value),
            fields::SUBMISSION_EMAIL_ADDRESSES => {
                record.submission_email_addresses = scalar(value)
            }
            LICENSES => record.licenses = licenses(value)?,
            _ => {
                record.extra.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(record)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn licenses(value: &Value) -> Result<BTreeMap<String, String>> {
    match value {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(map) => Ok(map
            .iter()
            .filter_map(|(slug, key)| scalar(key).map(|key| (slug.clone(), key)))
            .collect()),
        _ => Err(anyhow!("stored licenses must be a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_record_with_null_checkbox() {
        let stored = json!({
            "minimum_role": "publish_posts",
            "debug_mode": "enabled",
            "remove_data_on_uninstall": null,
            "licenses": { "reports": "KEY" },
            "reports_page": 12
        });

        let record = record_from_json(&stored).unwrap();
        assert_eq!(record.minimum_role.as_deref(), Some("publish_posts"));
        assert_eq!(record.remove_data_on_uninstall, None);
        assert_eq!(record.submission_manager_role, None);
        assert_eq!(record.licenses.get("reports").map(String::as_str), Some("KEY"));
        assert_eq!(record.extra.get("reports_page"), Some(&json!(12)));
    }

    #[test]
    fn test_absent_fields_not_written() {
        let record = SettingsRecord {
            log_entries: Some("disabled".to_string()),
            ..Default::default()
        };
        let json = record_to_json(&record);
        assert_eq!(json, json!({ "log_entries": "disabled" }));
    }

    #[test]
    fn test_core_field_wins_over_extra() {
        let mut record = SettingsRecord {
            debug_mode: Some("disabled".to_string()),
            ..Default::default()
        };
        record.extra.insert("debug_mode".to_string(), json!("enabled"));

        let json = record_to_json(&record);
        assert_eq!(json["debug_mode"], "disabled");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(record_from_json(&json!("badgeos")).is_err());
        assert!(record_from_json(&json!({ "licenses": [1, 2] })).is_err());
    }
}
