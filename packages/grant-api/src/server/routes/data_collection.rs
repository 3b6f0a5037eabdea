use axum::{extract::State, Json};
use serde::Deserialize;

use grant_pipeline::{Grant, GrantPipeline, Organization};

use super::validate_foundation_url;
use crate::server::{app::AppState, error::ApiError};

fn default_max_grants() -> Option<usize> {
    Some(10)
}

#[derive(Debug, Deserialize)]
pub struct GrantDataRequest {
    pub foundation_url: String,
    /// `null` or `0` lifts the limit.
    #[serde(default = "default_max_grants")]
    pub max_grants: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationDataRequest {
    pub foundation_url: String,
}

fn pipeline(state: &AppState) -> Result<GrantPipeline, ApiError> {
    Ok(GrantPipeline::new(state.fetcher.clone(), state.model()?)
        .with_crawl_config(state.crawl_config.clone()))
}

/// Grants found on a foundation site. An empty list is a valid answer.
pub async fn collect_grants_handler(
    State(state): State<AppState>,
    Json(request): Json<GrantDataRequest>,
) -> Result<Json<Vec<Grant>>, ApiError> {
    let url = validate_foundation_url(&request.foundation_url)?;
    tracing::info!(url = %url, max_grants = ?request.max_grants, "Grant data collection requested");

    let grants = pipeline(&state)?
        .collect_grants(&url, request.max_grants)
        .await?;
    Ok(Json(grants))
}

pub async fn collect_organization_handler(
    State(state): State<AppState>,
    Json(request): Json<OrganizationDataRequest>,
) -> Result<Json<Organization>, ApiError> {
    let url = validate_foundation_url(&request.foundation_url)?;
    tracing::info!(url = %url, "Organization data collection requested");

    pipeline(&state)?
        .collect_organization(&url)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No organization data found at {}", url)))
}
