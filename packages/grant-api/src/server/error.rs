//! API error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use grant_pipeline::{CrawlError, PipelineError};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid request: {0}")]
    Validation(String),

    /// A required provider key is not configured
    #[error("{0} is not configured")]
    ServiceUnavailable(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "invalid_url"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Pipeline(err) => match err {
                PipelineError::NoGrantsFound { .. } => (StatusCode::NOT_FOUND, "no_grants_found"),
                PipelineError::NoActiveGrants { .. } => {
                    (StatusCode::NOT_FOUND, "no_active_grants")
                }
                PipelineError::Crawl(CrawlError::InvalidUrl { .. })
                | PipelineError::Crawl(CrawlError::Security(_)) => {
                    (StatusCode::BAD_REQUEST, "invalid_url")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "processing_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!(error = %self, error_type, "Request failed");
        } else {
            tracing::warn!(error = %self, error_type, "Request rejected");
        }

        let details = match &self {
            ApiError::Pipeline(err) => std::error::Error::source(err).map(|s| s.to_string()),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
            error_type: error_type.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
