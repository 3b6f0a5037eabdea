use axum::{extract::State, Json};

use grant_pipeline::{GrantPipeline, PipelineOutcome, PipelineRequest};

use super::validate_foundation_url;
use crate::server::{app::AppState, error::ApiError};

/// Full four-step run: grants, organization, description, metadata.
pub async fn pipeline_handler(
    State(state): State<AppState>,
    Json(mut request): Json<PipelineRequest>,
) -> Result<Json<PipelineOutcome>, ApiError> {
    request.foundation_url = validate_foundation_url(&request.foundation_url)?;
    let model = state.model()?;

    let outcome = GrantPipeline::new(state.fetcher.clone(), model)
        .with_crawl_config(state.crawl_config.clone())
        .run(&request)
        .await?;

    tracing::info!(
        url = %request.foundation_url,
        grants = outcome.grants_data.len(),
        "Pipeline completed"
    );
    Ok(Json(outcome))
}
