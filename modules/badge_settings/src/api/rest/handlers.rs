//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::UserId;
use crate::domain::Service;
use axum::{
    extract::Query,
    http::HeaderMap,
    response::Html,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Header carrying the acting user id; absent or `0` means the current user
pub const ACTOR_HEADER: &str = "x-user-id";

/// Extract the acting user from request headers
pub fn actor_from_headers(headers: &HeaderMap) -> Option<UserId> {
    let id = headers
        .get(ACTOR_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;
    UserId::explicit(Some(UserId(id)))
}

// ===== Settings Handlers =====

/// Get the stored settings
pub async fn get_settings(
    service: Arc<Service>,
    headers: HeaderMap,
) -> Result<Json<SettingsDto>, Problem> {
    let actor = actor_from_headers(&headers);
    let settings = service
        .settings_for(actor)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(settings.into()))
}

/// Submit the settings form
pub async fn update_settings(
    service: Arc<Service>,
    headers: HeaderMap,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsDto>, Problem> {
    let actor = actor_from_headers(&headers);
    let saved = service
        .save_settings(actor, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(saved.into()))
}

/// Render the settings page
pub async fn settings_page(
    service: Arc<Service>,
    headers: HeaderMap,
) -> Result<Html<String>, Problem> {
    let actor = actor_from_headers(&headers);
    let page = service
        .render_settings_page(actor)
        .await
        .map_err(map_domain_error)?;

    Ok(Html(page))
}

// ===== Capability Handlers =====

/// Query parameters for capability checks
#[derive(Debug, Deserialize)]
pub struct CapabilitiesQuery {
    /// User to check; absent or `0` means the current user
    pub user_id: Option<u64>,
}

/// Report the configured capabilities and the submission-manager decision
pub async fn capabilities(
    service: Arc<Service>,
    Query(query): Query<CapabilitiesQuery>,
) -> Json<CapabilitiesResponse> {
    let user = UserId::explicit(query.user_id.map(UserId));
    let caps = service.capabilities().await;
    let can_manage_submissions = service.can_manage_submissions(user).await;

    Json(CapabilitiesResponse {
        manager_capability: caps.manager,
        submission_manager_capability: caps.submission_manager,
        user_id: user.map(|u| u.0),
        can_manage_submissions,
    })
}

// ===== Add-ons Handlers =====

/// Render the add-ons page around the cached feed
pub async fn add_ons_page(service: Arc<Service>) -> Result<Html<String>, Problem> {
    let page = service
        .render_add_ons_page()
        .await
        .map_err(map_domain_error)?;

    Ok(Html(page))
}

// ===== Help Handlers =====

/// Render the help and support page
pub async fn help_support_page(service: Arc<Service>) -> Result<Html<String>, Problem> {
    let page = service
        .render_help_support_page()
        .await
        .map_err(map_domain_error)?;

    Ok(Html(page))
}
