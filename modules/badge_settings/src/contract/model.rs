//! Contract models for the badge settings service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - REST DTOs live in `api::rest::dto`.

use std::collections::BTreeMap;

/// Capability required when no `minimum_role` has been stored
pub const DEFAULT_MANAGER_CAPABILITY: &str = "manage_options";

/// Literal value a checked `remove_data_on_uninstall` box submits
pub const CHECKBOX_ON: &str = "on";

/// Field names as they appear in a submitted settings form
pub mod fields {
    pub const MINIMUM_ROLE: &str = "minimum_role";
    pub const SUBMISSION_MANAGER_ROLE: &str = "submission_manager_role";
    pub const DEBUG_MODE: &str = "debug_mode";
    pub const LOG_ENTRIES: &str = "log_entries";
    pub const MS_SHOW_ALL_ACHIEVEMENTS: &str = "ms_show_all_achievements";
    pub const REMOVE_DATA_ON_UNINSTALL: &str = "remove_data_on_uninstall";
    pub const SUBMISSION_EMAIL: &str = "submission_email";
    pub const SUBMISSION_EMAIL_ADDRESSES: &str = "submission_email_addresses";

    /// Every field owned by the core record; extensions may not write these
    pub const CORE: &[&str] = &[
        MINIMUM_ROLE,
        SUBMISSION_MANAGER_ROLE,
        DEBUG_MODE,
        LOG_ENTRIES,
        MS_SHOW_ALL_ACHIEVEMENTS,
        REMOVE_DATA_ON_UNINSTALL,
        SUBMISSION_EMAIL,
        SUBMISSION_EMAIL_ADDRESSES,
    ];
}

/// Stored plugin settings record
///
/// Every scalar is optional so that "never stored" stays distinguishable
/// from "stored with the default value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsRecord {
    /// Capability required to administer the plugin
    pub minimum_role: Option<String>,
    /// Capability required to administer submissions and nominations
    pub submission_manager_role: Option<String>,
    /// `enabled` / `disabled`
    pub debug_mode: Option<String>,
    /// `enabled` / `disabled`
    pub log_entries: Option<String>,
    /// `enabled` / `disabled`, multisite only
    pub ms_show_all_achievements: Option<String>,
    /// `"on"` or cleared
    pub remove_data_on_uninstall: Option<String>,
    /// `enabled` / `disabled`
    pub submission_email: Option<String>,
    /// Comma-separated notification addresses
    pub submission_email_addresses: Option<String>,
    /// Add-on slug -> license key
    pub licenses: BTreeMap<String, String>,
    /// Extension-owned fields
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SettingsRecord {
    pub fn debug_mode(&self) -> Toggle {
        Toggle::parse(self.debug_mode.as_deref())
    }

    pub fn log_entries(&self) -> Toggle {
        Toggle::parse(self.log_entries.as_deref())
    }

    pub fn ms_show_all_achievements(&self) -> Toggle {
        Toggle::parse(self.ms_show_all_achievements.as_deref())
    }

    /// Whether all plugin data should be deleted on uninstall
    pub fn remove_data_on_uninstall(&self) -> bool {
        self.remove_data_on_uninstall.as_deref() == Some(CHECKBOX_ON)
    }
}

/// Two-state select value used by several settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    Enabled,
    #[default]
    Disabled,
}

impl Toggle {
    /// Interpret a stored value; anything other than `enabled` is disabled
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("enabled") => Self::Enabled,
            _ => Self::Disabled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Untrusted settings form submission
///
/// Fields hold the raw submitted strings. Keys that are not core fields are
/// passed through to extensions untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub fields: BTreeMap<String, String>,
    pub licenses: BTreeMap<String, String>,
}

impl SettingsInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Builder-style license setter
    pub fn with_license(mut self, slug: impl Into<String>, key: impl Into<String>) -> Self {
        self.licenses.insert(slug.into(), key.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Host user identifier; zero is never a real user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl UserId {
    /// Treat an absent or zero id as "no explicit user"
    pub fn explicit(user: Option<UserId>) -> Option<UserId> {
        user.filter(|u| u.0 != 0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Changes an extension contributes during validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDelta {
    /// Add-on slug -> license key
    pub licenses: BTreeMap<String, String>,
    /// Extension-owned fields
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SettingsDelta {
    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty() && self.extra.is_empty()
    }
}

/// Licensed add-on shown in the license section of the settings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensedAddon {
    /// Add-on slug, also the key in `SettingsRecord::licenses`
    pub slug: String,
    /// Display name, may be URL-encoded by the add-on
    pub item_name: String,
    /// Current license key
    pub license: String,
    /// Status reported by the license server
    pub license_status: Option<String>,
}

impl LicensedAddon {
    /// License status, `inactive` when the add-on reports none
    pub fn status(&self) -> &str {
        match self.license_status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "inactive",
        }
    }
}

/// Extra table row an extension injects into the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Element id the label points at
    pub id: String,
    /// Row label, escaped on render
    pub label: String,
    /// Field markup, rendered verbatim
    pub input_html: String,
    /// Optional help text, escaped on render
    pub description: Option<String>,
}

/// Who is looking at the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageView {
    /// Actor holds the literal `manage_options` capability
    pub can_edit_roles: bool,
    pub is_super_admin: bool,
    pub is_multisite: bool,
}

/// Section of the help and support page that extensions can append to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpSection {
    About,
    Help,
    Shortcodes,
}

/// Capabilities resolved from one settings load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub manager: String,
    pub submission_manager: String,
}
