//! Configuration for the badge settings module

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Message shown in place of the add-ons list when the feed cannot be fetched
pub const FEED_ERROR_MESSAGE: &str = "<div class=\"error\"><p>There was an error retrieving the add-ons list from the server. Please try again later.</div>";

/// Badge settings configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Options store key holding the settings record
    #[serde(default = "default_option_key")]
    pub option_key: String,

    /// Add-ons feed settings
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Add-ons feed configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Remote feed URL
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Transient store key for the cached feed
    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// How long a fetched feed stays cached
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Verify the feed server's TLS certificate
    #[serde(default)]
    pub verify_tls: bool,

    /// Request timeout; unset leaves the client default in place
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// Markup returned when the fetch fails
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            option_key: default_option_key(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            cache_key: default_cache_key(),
            cache_ttl: default_cache_ttl(),
            verify_tls: false,
            timeout: None,
            error_message: default_error_message(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file, then `BADGEOS_*`
    /// environment variables (`BADGEOS_FEED__URL` sets `feed.url`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("BADGEOS_").split("__"))
            .extract()?;
        Ok(config)
    }
}

fn default_option_key() -> String {
    "badgeos_settings".to_string()
}

fn default_feed_url() -> String {
    "http://badgeos.org/?feed=addons".to_string()
}

fn default_cache_key() -> String {
    "badgeos_add_ons_feed".to_string()
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(3600) // 1 hour
}

fn default_error_message() -> String {
    FEED_ERROR_MESSAGE.to_string()
}
