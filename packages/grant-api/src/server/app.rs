//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use grant_pipeline::{
    CrawlConfig, HttpFetcher, LanguageModel, OpenAI, PageFetcher, TavilyWebSearcher,
    ValidatedFetcher, WebSearcher,
};

use super::error::ApiError;
use super::routes::{
    collect_grants_handler, collect_organization_handler, find_url_handler,
    grant_description_handler, health_handler, metadata_handler, pipeline_handler, root_handler,
};
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    /// `None` when no OpenAI key is configured
    pub model: Option<Arc<dyn LanguageModel>>,
    /// `None` when no Tavily key is configured
    pub searcher: Option<Arc<dyn WebSearcher>>,
    pub crawl_config: CrawlConfig,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            model: None,
            searcher: None,
            crawl_config: CrawlConfig::default(),
            request_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_searcher(mut self, searcher: Arc<dyn WebSearcher>) -> Self {
        self.searcher = Some(searcher);
        self
    }

    pub fn with_crawl_config(mut self, config: CrawlConfig) -> Self {
        self.crawl_config = config;
        self
    }

    /// Real providers from configuration. Missing keys leave the matching
    /// provider unset; requests that need it answer 503.
    pub fn from_config(config: &Config) -> Result<Self> {
        let crawl_config = config.crawl_config();

        // Every fetch goes through SSRF validation
        let http = HttpFetcher::with_config(&crawl_config).context("Failed to build HTTP client")?;
        let mut state = Self::new(Arc::new(ValidatedFetcher::new(http)))
            .with_crawl_config(crawl_config);
        state.request_timeout = Duration::from_secs(config.request_timeout_secs);

        if let Some(credentials) = config.model_credentials() {
            state = state.with_model(Arc::new(OpenAI::from_credentials(&credentials)));
        }

        if let Some(key) = &config.tavily_api_key {
            state = state.with_searcher(Arc::new(TavilyWebSearcher::new(key.clone())));
        }

        Ok(state)
    }

    pub fn model(&self) -> Result<Arc<dyn LanguageModel>, ApiError> {
        self.model
            .clone()
            .ok_or(ApiError::ServiceUnavailable("OPENAI_API_KEY"))
    }

    pub fn searcher(&self) -> Result<Arc<dyn WebSearcher>, ApiError> {
        self.searcher
            .clone()
            .ok_or(ApiError::ServiceUnavailable("TAVILY_API_KEY"))
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let timeout = TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.request_timeout);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/v1/grant-data-collection/grants",
            post(collect_grants_handler),
        )
        .route(
            "/api/v1/grant-data-collection/organization",
            post(collect_organization_handler),
        )
        .route(
            "/api/v1/grant-content-generation/grant-description",
            post(grant_description_handler),
        )
        .route(
            "/api/v1/grant-content-generation/metadata",
            post(metadata_handler),
        )
        .route("/api/v1/pipeline/complete", post(pipeline_handler))
        .route(
            "/api/v1/organization-url-finder/find",
            post(find_url_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
