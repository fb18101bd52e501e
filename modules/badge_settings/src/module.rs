//! Module declaration and lifecycle

use crate::config::Config;
use crate::contract::BadgeSettingsApi;
use crate::domain::{
    EventPublisher, ExtensionRegistry, FeedSource, IdentityProvider, NoOpEventPublisher,
    OptionsStore, Service, TransientStore,
};
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Host collaborators the module is wired against
pub struct ModuleDeps {
    pub options: Arc<dyn OptionsStore>,
    pub transients: Arc<dyn TransientStore>,
    pub feed_source: Arc<dyn FeedSource>,
    pub identity: Arc<dyn IdentityProvider>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub extensions: ExtensionRegistry,
}

impl ModuleDeps {
    /// Dependencies with no event sink and no extensions
    pub fn new(
        options: Arc<dyn OptionsStore>,
        transients: Arc<dyn TransientStore>,
        feed_source: Arc<dyn FeedSource>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            options,
            transients,
            feed_source,
            identity,
            event_publisher: Arc::new(NoOpEventPublisher),
            extensions: ExtensionRegistry::new(),
        }
    }

    pub fn with_event_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.event_publisher = publisher;
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Badge settings module
pub struct BadgeSettingsModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for BadgeSettingsModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl BadgeSettingsModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    /// Build the domain service and return the in-process client
    pub fn init(&self, deps: ModuleDeps) -> Result<Arc<dyn BadgeSettingsApi>> {
        let config = self.config.read().clone();
        let extensions = deps.extensions.len();

        let service = Service::new(
            config,
            deps.options,
            deps.transients,
            deps.feed_source,
            deps.identity,
            deps.event_publisher,
        )?
        .with_extensions(deps.extensions);
        let service = Arc::new(service);
        *self.service.write() = Some(service.clone());

        tracing::info!(extensions, "Badge settings initialized with native client");
        Ok(Arc::new(crate::api::native::NativeClient::new(service)))
    }

    /// In-process client for an initialized module
    pub fn client(&self) -> Result<Arc<dyn BadgeSettingsApi>> {
        let service = self.service()?;
        Ok(Arc::new(crate::api::native::NativeClient::new(service)))
    }

    /// Mount the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering badge settings REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}
