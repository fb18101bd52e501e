//! Badge settings HTTP server.
//!
//! Serves the settings JSON API, the settings and add-ons pages, and the
//! capability check endpoint, backed by a JSON options file and an
//! in-process transient cache.

use anyhow::Context;
use badge_settings::config::Config;
use badge_settings::domain::InMemoryIdentityProvider;
use badge_settings::infra::http::ReqwestFeedSource;
use badge_settings::infra::storage::{InMemoryTransientStore, JsonFileOptionsStore};
use badge_settings::{BadgeSettingsModule, ModuleDeps, UserId};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "badge-settings-server", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "BADGEOS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8087")]
    bind: SocketAddr,

    /// JSON file holding the stored options
    #[arg(long, default_value = "badgeos-options.json")]
    data_file: PathBuf,

    /// User granted `manage_options` and treated as the current user
    #[arg(long)]
    admin_user: Option<u64>,

    /// Report a multisite network to the settings page
    #[arg(long)]
    multisite: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let identity = Arc::new(InMemoryIdentityProvider::new());
    identity.set_multisite(args.multisite);
    if let Some(id) = UserId::explicit(args.admin_user.map(UserId)) {
        identity.grant(id, badge_settings::contract::DEFAULT_MANAGER_CAPABILITY);
        identity.add_super_admin(id);
        identity.set_current_user(Some(id));
    }

    let feed_source = ReqwestFeedSource::new(&config.feed).context("building feed client")?;
    let deps = ModuleDeps::new(
        Arc::new(JsonFileOptionsStore::new(&args.data_file)),
        Arc::new(InMemoryTransientStore::new()),
        Arc::new(feed_source),
        identity,
    );

    let module = BadgeSettingsModule::new(config);
    module.init(deps)?;
    let router = module.register_rest(axum::Router::new())?;

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!(addr = %args.bind, data_file = %args.data_file.display(), "Badge settings server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
