//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::BadgeSettingsApi;
pub use error::SettingsError;
pub use model::{
    fields, Capabilities, FormRow, HelpSection, LicensedAddon, PageView, SettingsDelta, SettingsInput,
    SettingsRecord, Toggle, UserId, CHECKBOX_ON, DEFAULT_MANAGER_CAPABILITY,
};
