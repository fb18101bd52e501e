//! Host identity and authorization abstraction

use crate::contract::UserId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Trait for querying the host's identity/authorization system
///
/// Grant decisions are plain booleans; the host is expected to answer
/// "no" for unknown users rather than fail.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// User making the current request, if anyone is logged in
    async fn current_user(&self) -> Option<UserId>;

    /// Whether `user` holds `capability`
    async fn user_can(&self, user: UserId, capability: &str) -> bool;

    /// Whether `user` administers the whole network
    async fn is_super_admin(&self, user: UserId) -> bool;

    /// Whether the host runs as a multisite network
    async fn is_multisite(&self) -> bool;
}

/// Resolve an explicit user id, falling back to the current actor for
/// absent or zero ids
pub async fn resolve_actor(
    identity: &dyn IdentityProvider,
    user: Option<UserId>,
) -> Option<UserId> {
    match UserId::explicit(user) {
        Some(user) => Some(user),
        None => identity.current_user().await,
    }
}

/// In-memory identity provider
///
/// Stores capability grants per user. Used by the standalone server and tests.
#[derive(Clone, Default)]
pub struct InMemoryIdentityProvider {
    current: Arc<RwLock<Option<UserId>>>,
    grants: Arc<RwLock<HashMap<UserId, HashSet<String>>>>,
    super_admins: Arc<RwLock<HashSet<UserId>>>,
    multisite: Arc<RwLock<bool>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user returned by `current_user`
    pub fn set_current_user(&self, user: Option<UserId>) {
        *self.current.write() = user;
    }

    /// Grant a capability to a user
    pub fn grant(&self, user: UserId, capability: impl Into<String>) {
        self.grants
            .write()
            .entry(user)
            .or_default()
            .insert(capability.into());
    }

    /// Remove a capability from a user
    pub fn revoke(&self, user: UserId, capability: &str) {
        if let Some(caps) = self.grants.write().get_mut(&user) {
            caps.remove(capability);
        }
    }

    pub fn add_super_admin(&self, user: UserId) {
        self.super_admins.write().insert(user);
    }

    pub fn set_multisite(&self, multisite: bool) {
        *self.multisite.write() = multisite;
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> Option<UserId> {
        *self.current.read()
    }

    async fn user_can(&self, user: UserId, capability: &str) -> bool {
        self.grants
            .read()
            .get(&user)
            .is_some_and(|caps| caps.contains(capability))
    }

    async fn is_super_admin(&self, user: UserId) -> bool {
        self.super_admins.read().contains(&user)
    }

    async fn is_multisite(&self) -> bool {
        *self.multisite.read()
    }
}
