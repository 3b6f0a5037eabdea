//! Integration tests for the grant API endpoints.
//!
//! The router runs against mock providers, so no network or model access
//! is needed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use grant_api::{build_app, AppState};
use grant_pipeline::testing::{MockFetcher, MockLanguageModel, MockWebSearcher};

const ROOT: &str = "https://lakesidefund.org/";

const METADATA_REPLY: &str = r#"{
    "opportunity_title": "Grants for Lake Conservation Projects",
    "h1_tag": "Lake Conservation Funding",
    "meta_title": "Lake Conservation Grants up to $10,000",
    "meta_description": "Support for shoreline and water quality work",
    "opportunity_teaser": "Nonprofits protecting lakes can apply...",
    "opportunity_title_for_subscriber": "Shoreline Grant: up to $10,000 for lake nonprofits"
}"#;

fn site() -> MockFetcher {
    MockFetcher::new()
        .with_page(
            ROOT,
            r#"<a href="/grants/shoreline">Shoreline Grant</a><a href="/contact">Contact</a>"#,
        )
        .with_page(
            "https://lakesidefund.org/grants/shoreline",
            "<main><h1>Shoreline Grant</h1><p>Up to $10,000 for lake nonprofits.</p></main>",
        )
        .with_page(
            "https://lakesidefund.org/contact",
            "<main><p>Lakeside Fund, 4 Harbor Road.</p></main>",
        )
}

fn model() -> MockLanguageModel {
    // The description prompt repeats the organization address, so the
    // writer prompts are matched first.
    MockLanguageModel::new()
        .with_response("Multiple Grants Data", "### 🏢 Organization Name\nLakeside Fund")
        .with_response("Grant Data:", METADATA_REPLY)
        .with_response(
            "4 Harbor Road",
            r#"{"org_name": "Lakeside Fund", "contact": {"address": "4 Harbor Road"}}"#,
        )
        .with_response(
            "Up to $10,000 for lake nonprofits",
            r#"{"grant_name": "Shoreline Grant", "grant_amount": "$10,000"}"#,
        )
}

fn app() -> Router {
    build_app(AppState::new(Arc::new(site())).with_model(Arc::new(model())))
}

fn app_without_keys() -> Router {
    build_app(AppState::new(Arc::new(site())))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Banner and health
// =============================================================================

#[tokio::test]
async fn test_root_banner() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Grant Writer Agent API is running");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["endpoints"].is_object());
}

#[tokio::test]
async fn test_health_reports_configured_providers() {
    let body = json_body(app().oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["openai_configured"], true);
    assert_eq!(body["tavily_configured"], false);
    assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 6);
}

// =============================================================================
// Data collection
// =============================================================================

#[tokio::test]
async fn test_collect_grants() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-data-collection/grants",
            json!({ "foundation_url": ROOT }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let grants = body.as_array().unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["grant_name"], "Shoreline Grant");
    assert_eq!(grants[0]["grant_url"], "https://lakesidefund.org/grants/shoreline");
    assert_eq!(grants[0]["recurrence"], "Not specified");
}

#[tokio::test]
async fn test_zero_or_null_max_grants_means_no_limit() {
    for max_grants in [json!(0), Value::Null] {
        let response = app()
            .oneshot(post(
                "/api/v1/grant-data-collection/grants",
                json!({ "foundation_url": ROOT, "max_grants": max_grants }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "max_grants {}", max_grants);

        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1, "max_grants {}", max_grants);
    }
}

#[tokio::test]
async fn test_collect_organization() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-data-collection/organization",
            json!({ "foundation_url": ROOT }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["org_name"], "Lakeside Fund");
    assert_eq!(body["contact"]["address"], "4 Harbor Road");
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-data-collection/grants",
            json!({ "foundation_url": "not a url" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "invalid_url");
}

#[tokio::test]
async fn test_missing_field_is_unprocessable() {
    let response = app()
        .oneshot(post("/api/v1/grant-data-collection/grants", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_model_key_is_503() {
    let response = app_without_keys()
        .oneshot(post(
            "/api/v1/grant-data-collection/grants",
            json!({ "foundation_url": ROOT }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = json_body(response).await;
    assert_eq!(body["error_type"], "service_unavailable");
    assert_eq!(body["message"], "OPENAI_API_KEY is not configured");
}

// =============================================================================
// Content generation
// =============================================================================

#[tokio::test]
async fn test_grant_description() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-content-generation/grant-description",
            json!({
                "grants_data": [{ "grant_name": "Shoreline Grant", "proposal_deadline": "May 1" }],
                "org_data": { "org_name": "Lakeside Fund" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["consolidated_description"]
        .as_str()
        .unwrap()
        .contains("Lakeside Fund"));
}

#[tokio::test]
async fn test_grant_description_requires_grants() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-content-generation/grant-description",
            json!({ "grants_data": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata() {
    let response = app()
        .oneshot(post(
            "/api/v1/grant-content-generation/metadata",
            json!({ "consolidated_description": "### 🏢 Lakeside Fund" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["h1_tag"], "Lake Conservation Funding");
}

// =============================================================================
// Pipeline
// =============================================================================

#[tokio::test]
async fn test_complete_pipeline() {
    let response = app()
        .oneshot(post(
            "/api/v1/pipeline/complete",
            json!({ "foundation_url": ROOT, "max_grants": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["grants_data"].as_array().unwrap().len(), 1);
    assert_eq!(body["organization_data"]["org_name"], "Lakeside Fund");
    assert!(body["consolidated_description"]
        .as_str()
        .unwrap()
        .starts_with("### 🏢"));
    assert_eq!(body["metadata"]["meta_title"], "Lake Conservation Grants up to $10,000");
}

#[tokio::test]
async fn test_complete_pipeline_with_zero_max_grants() {
    let response = app()
        .oneshot(post(
            "/api/v1/pipeline/complete",
            json!({ "foundation_url": ROOT, "max_grants": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["grants_data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pipeline_without_grants_is_404() {
    let state = AppState::new(Arc::new(MockFetcher::new().with_page(ROOT, "<p>Welcome</p>")))
        .with_model(Arc::new(MockLanguageModel::new()));

    let response = build_app(state)
        .oneshot(post(
            "/api/v1/pipeline/complete",
            json!({ "foundation_url": ROOT }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error_type"], "no_grants_found");
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let model = MockLanguageModel::new()
        .with_default(METADATA_REPLY)
        .with_delay(Duration::from_secs(5));
    let mut state = AppState::new(Arc::new(site())).with_model(Arc::new(model));
    state.request_timeout = Duration::from_millis(50);

    let response = build_app(state)
        .oneshot(post(
            "/api/v1/grant-content-generation/metadata",
            json!({ "consolidated_description": "### 🏢 Lakeside Fund" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

// =============================================================================
// URL finder
// =============================================================================

#[tokio::test]
async fn test_url_finder() {
    let searcher = MockWebSearcher::new().with_urls(
        "Lakeside foundation official website",
        &["https://lakesidefund.org/"],
    );
    let model = MockLanguageModel::new().with_default("https://lakesidefund.org/");
    let fetcher = MockFetcher::new().with_page("https://lakesidefund.org/", "Lakeside Foundation grants");
    let state = AppState::new(Arc::new(fetcher))
        .with_model(Arc::new(model))
        .with_searcher(Arc::new(searcher));

    let response = build_app(state)
        .oneshot(post(
            "/api/v1/organization-url-finder/find",
            json!({ "organization_name": "Lakeside" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["url"], "https://lakesidefund.org/");
    assert_eq!(body["attempts"], 1);
}

#[tokio::test]
async fn test_url_finder_requires_search_key() {
    let response = app()
        .oneshot(post(
            "/api/v1/organization-url-finder/find",
            json!({ "organization_name": "Lakeside" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
