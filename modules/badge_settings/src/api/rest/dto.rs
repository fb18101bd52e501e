//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Stored settings response DTO
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettingsDto {
    /// Capability required to administer the plugin
    #[schema(example = "manage_options")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_role: Option<String>,

    /// Capability required to administer submissions
    #[schema(example = "publish_posts")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_manager_role: Option<String>,

    #[schema(example = "disabled")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<String>,

    #[schema(example = "disabled")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_entries: Option<String>,

    #[schema(example = "disabled")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_show_all_achievements: Option<String>,

    /// `on` when plugin data is deleted on uninstall
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_data_on_uninstall: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_email_addresses: Option<String>,

    /// Add-on slug -> license key
    #[serde(default)]
    pub licenses: BTreeMap<String, String>,

    /// Extension-owned fields
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Settings form submission
///
/// Only submitted fields are changed, except `remove_data_on_uninstall`
/// which is cleared unless submitted as `on`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    /// Field name -> raw submitted value
    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    /// Add-on slug -> submitted license key
    #[serde(default)]
    pub licenses: BTreeMap<String, String>,
}

/// Capability check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapabilitiesResponse {
    /// Capability required to administer the plugin
    pub manager_capability: String,

    /// Capability required to administer submissions
    pub submission_manager_capability: String,

    /// User the decision was made for; absent means the current actor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Whether that user can manage submissions
    pub can_manage_submissions: bool,
}

// Note: Conversion implementations live in mapper.rs
