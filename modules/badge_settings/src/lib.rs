//! Badge Settings Module
//!
//! Administrative settings for a badge/achievement plugin: form validation,
//! capability resolution, the settings and add-ons pages, and a cached
//! add-ons feed.

// Public exports
pub mod contract;
pub use contract::{
    client::BadgeSettingsApi, error::SettingsError, Capabilities, HelpSection, LicensedAddon,
    SettingsInput, SettingsRecord, Toggle, UserId,
};

// Admin screen label filters
pub use domain::labels::{
    featured_image_label, featured_image_metabox_text, media_modal_strings, PostKind,
};

pub mod module;
pub use module::{BadgeSettingsModule, ModuleDeps};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
