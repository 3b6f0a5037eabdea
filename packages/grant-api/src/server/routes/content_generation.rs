use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use grant_pipeline::{DescriptionWriter, Grant, GrantMetadata, MetadataWriter, Organization};

use crate::server::{app::AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct GrantWriterRequest {
    pub grants_data: Vec<Grant>,
    #[serde(default)]
    pub org_data: Option<Organization>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrantWriterResponse {
    pub consolidated_description: String,
}

#[derive(Debug, Deserialize)]
pub struct MetadataWriterRequest {
    pub consolidated_description: String,
}

/// One consolidated description over the active grants supplied.
pub async fn grant_description_handler(
    State(state): State<AppState>,
    Json(request): Json<GrantWriterRequest>,
) -> Result<Json<GrantWriterResponse>, ApiError> {
    if request.grants_data.is_empty() {
        return Err(ApiError::Validation("grants_data must not be empty".into()));
    }

    let writer = DescriptionWriter::new(state.model()?);
    let result = writer
        .process_grants_consolidated(&request.grants_data, request.org_data.as_ref())
        .await?;

    Ok(Json(GrantWriterResponse {
        consolidated_description: result.description,
    }))
}

pub async fn metadata_handler(
    State(state): State<AppState>,
    Json(request): Json<MetadataWriterRequest>,
) -> Result<Json<GrantMetadata>, ApiError> {
    if request.consolidated_description.trim().is_empty() {
        return Err(ApiError::Validation(
            "consolidated_description must not be empty".into(),
        ));
    }

    let metadata = MetadataWriter::new(state.model()?)
        .generate(&request.consolidated_description)
        .await?;
    Ok(Json(metadata))
}
