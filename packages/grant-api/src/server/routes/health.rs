use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::server::app::AppState;

pub const API_VERSION: &str = "1.0.0";

pub const ENDPOINTS: &[&str] = &[
    "/api/v1/grant-data-collection/grants",
    "/api/v1/grant-data-collection/organization",
    "/api/v1/grant-content-generation/grant-description",
    "/api/v1/grant-content-generation/metadata",
    "/api/v1/pipeline/complete",
    "/api/v1/organization-url-finder/find",
];

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    api_version: String,
    timestamp: DateTime<Utc>,
    openai_configured: bool,
    tavily_configured: bool,
    available_endpoints: Vec<String>,
}

/// Service banner
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Grant Writer Agent API is running",
        "version": API_VERSION,
        "endpoints": {
            "data_collection": "/api/v1/grant-data-collection",
            "content_generation": "/api/v1/grant-content-generation",
            "pipeline": "/api/v1/pipeline",
            "url_finder": "/api/v1/organization-url-finder",
            "health": "/health"
        }
    }))
}

/// Health check endpoint
///
/// Always 200; the flags report which providers are usable.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        api_version: API_VERSION.to_string(),
        timestamp: Utc::now(),
        openai_configured: state.model.is_some(),
        tavily_configured: state.searcher.is_some(),
        available_endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}
