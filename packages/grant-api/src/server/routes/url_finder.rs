use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use grant_pipeline::{UrlFinder, UrlFinderOutcome};

use crate::server::{app::AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct UrlFinderRequest {
    pub organization_name: String,
    #[serde(default)]
    pub foundation_data: Option<Map<String, Value>>,
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

/// Always 200 once the run starts; `success` and `error` tell the outcome.
pub async fn find_url_handler(
    State(state): State<AppState>,
    Json(request): Json<UrlFinderRequest>,
) -> Result<Json<UrlFinderOutcome>, ApiError> {
    let name = request.organization_name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("organization_name must not be empty".into()));
    }

    let finder = UrlFinder::new(state.searcher()?, state.model()?, state.fetcher.clone())
        .with_max_attempts(request.max_attempts.unwrap_or(1));

    let outcome = finder.find(name, request.foundation_data.as_ref()).await;
    Ok(Json(outcome))
}
