//! Common test utilities: collaborator mocks and a service builder

#![allow(dead_code)]

use async_trait::async_trait;
use badge_settings::config::Config;
use badge_settings::domain::feed::{FeedError, FeedResponse, FeedSource};
use badge_settings::domain::{
    EventPublisher, ExtensionRegistry, InMemoryIdentityProvider, SettingsEvent, Service,
};
use badge_settings::infra::storage::{InMemoryOptionsStore, InMemoryTransientStore};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Feed source returning a fixed body and counting calls
pub struct CountingFeedSource {
    body: String,
    calls: AtomicUsize,
}

impl CountingFeedSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for CountingFeedSource {
    async fn fetch(&self, _url: &str) -> Result<FeedResponse, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FeedResponse {
            status: 200,
            body: self.body.clone(),
        })
    }
}

/// Feed source whose every request fails at the transport level
#[derive(Default)]
pub struct FailingFeedSource {
    calls: AtomicUsize,
}

impl FailingFeedSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for FailingFeedSource {
    async fn fetch(&self, _url: &str) -> Result<FeedResponse, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FeedError::Request("connection timed out".to_string()))
    }
}

/// Event publisher that keeps every published event
#[derive(Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<SettingsEvent>>>,
}

impl RecordingEventPublisher {
    pub fn events(&self) -> Vec<SettingsEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: SettingsEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Service wired against in-memory collaborators
pub struct Harness {
    pub options: Arc<InMemoryOptionsStore>,
    pub transients: Arc<InMemoryTransientStore>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub events: RecordingEventPublisher,
    pub service: Service,
}

impl Harness {
    pub fn new(feed_source: Arc<dyn FeedSource>) -> Self {
        Self::with_extensions(feed_source, ExtensionRegistry::new())
    }

    pub fn with_extensions(feed_source: Arc<dyn FeedSource>, extensions: ExtensionRegistry) -> Self {
        Self::build(Config::default(), feed_source, extensions)
    }

    pub fn with_config(config: Config, feed_source: Arc<dyn FeedSource>) -> Self {
        Self::build(config, feed_source, ExtensionRegistry::new())
    }

    fn build(
        config: Config,
        feed_source: Arc<dyn FeedSource>,
        extensions: ExtensionRegistry,
    ) -> Self {
        let options = Arc::new(InMemoryOptionsStore::new());
        let transients = Arc::new(InMemoryTransientStore::new());
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let events = RecordingEventPublisher::default();

        let service = Service::new(
            config,
            options.clone(),
            transients.clone(),
            feed_source,
            identity.clone(),
            Arc::new(events.clone()),
        )
        .unwrap()
        .with_extensions(extensions);

        Self {
            options,
            transients,
            identity,
            events,
            service,
        }
    }
}
