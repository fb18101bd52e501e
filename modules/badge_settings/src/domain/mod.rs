//! Domain layer - business logic and services

pub mod capability;
pub mod events;
pub mod extensions;
pub mod feed;
pub mod identity;
pub mod labels;
pub mod render;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, NoOpEventPublisher, SettingsEvent};
pub use extensions::{ExtensionRegistry, LicenseKeysExtension, SettingsExtension};
pub use feed::{FeedError, FeedResponse, FeedSource};
pub use identity::{IdentityProvider, InMemoryIdentityProvider};
pub use repository::{OptionsStore, TransientStore};
pub use service::Service;
