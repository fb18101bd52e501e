//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{BadgeSettingsApi, SettingsError, SettingsInput, SettingsRecord, UserId};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by the rest of the plugin for in-process calls without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BadgeSettingsApi for NativeClient {
    async fn load_settings(&self) -> SettingsRecord {
        self.service.load_settings().await
    }

    async fn settings_for(&self, actor: Option<UserId>) -> Result<SettingsRecord, SettingsError> {
        self.service.settings_for(actor).await
    }

    async fn save_settings(
        &self,
        actor: Option<UserId>,
        input: SettingsInput,
    ) -> Result<SettingsRecord, SettingsError> {
        self.service.save_settings(actor, input).await
    }

    async fn manager_capability(&self) -> String {
        self.service.manager_capability().await
    }

    async fn submission_manager_capability(&self) -> String {
        self.service.submission_manager_capability().await
    }

    async fn can_manage_submissions(&self, user: Option<UserId>) -> bool {
        self.service.can_manage_submissions(user).await
    }

    async fn add_ons_feed(&self) -> String {
        self.service.add_ons_feed().await
    }

    async fn render_settings_page(&self, actor: Option<UserId>) -> Result<String, SettingsError> {
        self.service.render_settings_page(actor).await
    }

    async fn render_add_ons_page(&self) -> Result<String, SettingsError> {
        self.service.render_add_ons_page().await
    }

    async fn render_help_support_page(&self) -> Result<String, SettingsError> {
        self.service.render_help_support_page().await
    }
}
