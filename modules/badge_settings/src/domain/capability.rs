//! Capability resolution from a loaded settings record

use super::identity::{resolve_actor, IdentityProvider};
use crate::contract::{Capabilities, SettingsRecord, UserId, DEFAULT_MANAGER_CAPABILITY};

/// Capability required to administer the plugin
pub fn manager_capability(settings: &SettingsRecord) -> &str {
    settings
        .minimum_role
        .as_deref()
        .unwrap_or(DEFAULT_MANAGER_CAPABILITY)
}

/// Capability required to administer submissions; falls back to the manager capability
pub fn submission_manager_capability(settings: &SettingsRecord) -> &str {
    settings
        .submission_manager_role
        .as_deref()
        .unwrap_or_else(|| manager_capability(settings))
}

/// Capability required to save the settings form
pub fn settings_page_capability(settings: &SettingsRecord) -> &str {
    manager_capability(settings)
}

pub fn capabilities(settings: &SettingsRecord) -> Capabilities {
    Capabilities {
        manager: manager_capability(settings).to_string(),
        submission_manager: submission_manager_capability(settings).to_string(),
    }
}

/// Whether `user` (or the current actor for `None`/zero) can manage submissions
///
/// The manager capability is always sufficient.
pub async fn can_manage_submissions(
    identity: &dyn IdentityProvider,
    settings: &SettingsRecord,
    user: Option<UserId>,
) -> bool {
    let Some(actor) = resolve_actor(identity, user).await else {
        return false;
    };

    identity
        .user_can(actor, submission_manager_capability(settings))
        .await
        || identity.user_can(actor, manager_capability(settings)).await
}

/// Whether the actor may see and change the role selectors
///
/// Role selectors are reserved for full administrators regardless of the
/// configured minimum role.
pub async fn can_edit_role_settings(identity: &dyn IdentityProvider, actor: Option<UserId>) -> bool {
    match resolve_actor(identity, actor).await {
        Some(actor) => identity.user_can(actor, DEFAULT_MANAGER_CAPABILITY).await,
        None => false,
    }
}
