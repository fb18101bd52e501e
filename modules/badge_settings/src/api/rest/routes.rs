//! Route registration

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::Query,
    http::HeaderMap,
    response::Html,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // Settings endpoints
        .route(
            "/badgeos/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/badgeos/settings/page", get(settings_page_handler))
        // Capability endpoints
        .route("/badgeos/capabilities", get(capabilities_handler))
        // Add-ons endpoints
        .route("/badgeos/add-ons", get(add_ons_page_handler))
        // Help endpoints
        .route("/badgeos/help", get(help_support_page_handler))
        // Add service as extension for handlers
        .layer(Extension(service));

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====

async fn get_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
) -> Result<Json<SettingsDto>, Problem> {
    handlers::get_settings(service, headers).await
}

async fn update_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    json: Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsDto>, Problem> {
    handlers::update_settings(service, headers, json).await
}

async fn settings_page_handler(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
) -> Result<Html<String>, Problem> {
    handlers::settings_page(service, headers).await
}

async fn capabilities_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::CapabilitiesQuery>,
) -> Json<CapabilitiesResponse> {
    handlers::capabilities(service, query).await
}

async fn add_ons_page_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Html<String>, Problem> {
    handlers::add_ons_page(service).await
}

async fn help_support_page_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Html<String>, Problem> {
    handlers::help_support_page(service).await
}
