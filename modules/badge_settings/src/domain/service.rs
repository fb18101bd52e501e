//! Domain service - business logic orchestration
//!
//! Each operation loads the stored settings record once and passes it
//! explicitly to the capability, validation and rendering helpers.

use super::capability;
use super::events::{EventPublisher, SettingsEvent};
use super::extensions::ExtensionRegistry;
use super::feed::{self, FeedSource};
use super::identity::{resolve_actor, IdentityProvider};
use super::render::SettingsRenderer;
use super::repository::{OptionsStore, TransientStore};
use super::validation::validate_settings;
use crate::config::Config;
use crate::contract::{
    fields, Capabilities, HelpSection, PageView, SettingsError, SettingsInput, SettingsRecord,
    UserId,
};
use std::sync::Arc;

/// Domain service for the badge settings screens
pub struct Service {
    config: Config,
    options: Arc<dyn OptionsStore>,
    transients: Arc<dyn TransientStore>,
    feed_source: Arc<dyn FeedSource>,
    identity: Arc<dyn IdentityProvider>,
    event_publisher: Arc<dyn EventPublisher>,
    extensions: ExtensionRegistry,
    renderer: SettingsRenderer,
}

impl Service {
    /// Create a new service instance with no extensions registered
    pub fn new(
        config: Config,
        options: Arc<dyn OptionsStore>,
        transients: Arc<dyn TransientStore>,
        feed_source: Arc<dyn FeedSource>,
        identity: Arc<dyn IdentityProvider>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            options,
            transients,
            feed_source,
            identity,
            event_publisher,
            extensions: ExtensionRegistry::new(),
            renderer: SettingsRenderer::new()?,
        })
    }

    /// Replace the extension registry
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Settings =====

    /// Load the stored record, falling back to defaults when it is missing
    /// or cannot be read
    pub async fn load_settings(&self) -> SettingsRecord {
        match self.options.load(&self.config.option_key).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(key = %self.config.option_key, "No stored settings, using defaults");
                SettingsRecord::default()
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.config.option_key,
                    error = %e,
                    "Failed to load settings, using defaults"
                );
                SettingsRecord::default()
            }
        }
    }

    /// Stored record for an actor allowed onto the settings page
    pub async fn settings_for(&self, actor: Option<UserId>) -> Result<SettingsRecord, SettingsError> {
        let settings = self.load_settings().await;
        self.authorize(&settings, actor, "read").await?;
        Ok(settings)
    }

    /// Validate a form submission and persist the merged record
    pub async fn save_settings(
        &self,
        actor: Option<UserId>,
        mut input: SettingsInput,
    ) -> Result<SettingsRecord, SettingsError> {
        let previous = self.load_settings().await;
        let actor = self.authorize(&previous, actor, "save").await?;

        // Role selectors are only rendered for full administrators
        if !capability::can_edit_role_settings(self.identity.as_ref(), Some(actor)).await {
            for field in [fields::MINIMUM_ROLE, fields::SUBMISSION_MANAGER_ROLE] {
                if input.fields.remove(field).is_some() {
                    tracing::warn!(field, "Ignoring role change from non-administrator");
                }
            }
        }

        let merged = validate_settings(&input, &previous, &self.extensions);

        self.options
            .save(&self.config.option_key, &merged)
            .await
            .map_err(|e| {
                tracing::error!(key = %self.config.option_key, error = %e, "Failed to store settings");
                SettingsError::Storage {
                    message: e.to_string(),
                }
            })?;

        tracing::info!(
            actor = actor.0,
            remove_data_on_uninstall = merged.remove_data_on_uninstall(),
            "Settings saved"
        );

        let event = SettingsEvent::saved(&self.config.option_key, &merged, Some(actor));
        if let Err(e) = self.event_publisher.publish(event).await {
            // Log error but don't fail the operation
            tracing::warn!(error = %e, "Failed to publish settings saved event");
        }

        Ok(merged)
    }

    // ===== Capabilities =====

    pub async fn capabilities(&self) -> Capabilities {
        capability::capabilities(&self.load_settings().await)
    }

    pub async fn manager_capability(&self) -> String {
        capability::manager_capability(&self.load_settings().await).to_string()
    }

    pub async fn submission_manager_capability(&self) -> String {
        capability::submission_manager_capability(&self.load_settings().await).to_string()
    }

    pub async fn can_manage_submissions(&self, user: Option<UserId>) -> bool {
        let settings = self.load_settings().await;
        capability::can_manage_submissions(self.identity.as_ref(), &settings, user).await
    }

    // ===== Pages =====

    /// Add-ons feed markup, from cache when fresh
    pub async fn add_ons_feed(&self) -> String {
        feed::get_or_fetch(
            self.transients.as_ref(),
            self.feed_source.as_ref(),
            self.event_publisher.as_ref(),
            &self.config.feed,
        )
        .await
    }

    /// Settings form for the given actor (current user for `None`)
    pub async fn render_settings_page(&self, actor: Option<UserId>) -> Result<String, SettingsError> {
        let settings = self.load_settings().await;
        let actor = self.authorize(&settings, actor, "render").await?;
        let view = self.page_view(actor).await;
        let rows = self.extensions.render_rows(&settings);
        let licenses = self.extensions.licensed_addons(&settings);
        self.renderer.settings_page(&settings, view, &rows, &licenses)
    }

    /// Add-ons page with the (possibly cached) feed embedded
    pub async fn render_add_ons_page(&self) -> Result<String, SettingsError> {
        let feed = self.add_ons_feed().await;
        self.renderer.add_ons_page(&feed)
    }

    /// Help and support page with extension sections appended
    pub async fn render_help_support_page(&self) -> Result<String, SettingsError> {
        self.renderer.help_support_page(
            &self.extensions.help_sections(HelpSection::About),
            &self.extensions.help_sections(HelpSection::Help),
            &self.extensions.help_sections(HelpSection::Shortcodes),
        )
    }

    /// Resolve the actor and require the settings page capability
    async fn authorize(
        &self,
        settings: &SettingsRecord,
        actor: Option<UserId>,
        operation: &str,
    ) -> Result<UserId, SettingsError> {
        let required = capability::settings_page_capability(settings);
        let actor = resolve_actor(self.identity.as_ref(), actor).await;
        match actor {
            Some(user) if self.identity.user_can(user, required).await => Ok(user),
            _ => {
                tracing::warn!(
                    actor = ?actor.map(|u| u.0),
                    capability = required,
                    operation,
                    "Settings access rejected"
                );
                Err(SettingsError::Forbidden {
                    capability: required.to_string(),
                })
            }
        }
    }

    async fn page_view(&self, actor: UserId) -> PageView {
        let identity = self.identity.as_ref();
        PageView {
            can_edit_roles: capability::can_edit_role_settings(identity, Some(actor)).await,
            is_super_admin: identity.is_super_admin(actor).await,
            is_multisite: identity.is_multisite().await,
        }
    }
}
