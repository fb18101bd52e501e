//! Native client trait for inter-module communication
//!
//! Other parts of the plugin (submission screens, uninstall routine, logging)
//! call these directly instead of reading the stored record themselves.

use super::{
    error::SettingsError,
    model::{SettingsInput, SettingsRecord, UserId},
};
use async_trait::async_trait;

/// Badge settings API for inter-module communication
#[async_trait]
pub trait BadgeSettingsApi: Send + Sync {
    // ===== Settings =====

    /// Load the stored settings, or defaults when nothing is stored.
    /// No capability check; use `settings_for` on behalf of a user.
    async fn load_settings(&self) -> SettingsRecord;

    /// Stored settings for an actor holding the settings page capability
    async fn settings_for(&self, actor: Option<UserId>) -> Result<SettingsRecord, SettingsError>;

    /// Validate a submission against the stored record and persist the result
    async fn save_settings(
        &self,
        actor: Option<UserId>,
        input: SettingsInput,
    ) -> Result<SettingsRecord, SettingsError>;

    // ===== Capabilities =====

    /// Capability required to administer the plugin
    async fn manager_capability(&self) -> String;

    /// Capability required to administer submissions
    async fn submission_manager_capability(&self) -> String;

    /// Whether a user (or the current actor when `None`/zero) can manage submissions
    async fn can_manage_submissions(&self, user: Option<UserId>) -> bool;

    // ===== Pages =====

    /// Add-ons feed markup, cached for the configured TTL
    async fn add_ons_feed(&self) -> String;

    /// Settings form markup; `Forbidden` unless the actor holds the settings page capability
    async fn render_settings_page(&self, actor: Option<UserId>) -> Result<String, SettingsError>;

    /// Add-ons page wrapped around the cached feed
    async fn render_add_ons_page(&self) -> Result<String, SettingsError>;

    /// Help and support page with extension sections
    async fn render_help_support_page(&self) -> Result<String, SettingsError>;
}
