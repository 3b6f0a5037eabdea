//! Testing utilities including mock implementations.
//!
//! These let the collectors, writers, finder and the whole pipeline run
//! without network access or a real model.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{CrawlError, CrawlResult, PipelineError, Result};
use crate::traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
};
use crate::types::page::FetchedPage;

pub use crate::traits::searcher::MockWebSearcher;

/// A mock fetcher serving canned HTML by URL.
///
/// Unregistered URLs answer with a 404 [`CrawlError::Status`].
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), html);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// Serve `html` for `url` as if the request ended up at `final_url`.
    pub fn with_redirect(
        self,
        url: impl Into<String>,
        final_url: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), html).with_final_url(final_url);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// URLs requested so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.read().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage> {
        self.fetched.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock language model.
///
/// Replies are chosen by the first registered substring found in the
/// prompt, falling back to the default reply (`{}` unless overridden).
#[derive(Clone)]
pub struct MockLanguageModel {
    responses: Arc<RwLock<Vec<(String, String)>>>,
    default_reply: String,
    fail: bool,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self {
            responses: Arc::default(),
            default_reply: "{}".to_string(),
            fail: false,
            delay: None,
            calls: Arc::default(),
        }
    }
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` whenever the prompt contains `needle`.
    pub fn with_response(self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((needle.into(), reply.into()));
        self
    }

    pub fn with_default(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Sleep this long before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call fails with a model error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let reply = self
            .responses
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_reply.clone());

        self.calls.write().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(PipelineError::model("mock model failure"));
        }
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_registered_pages() {
        let fetcher = MockFetcher::new().with_page("https://example.org/", "<p>hi</p>");

        let page = fetcher.fetch("https://example.org/").await.unwrap();
        assert_eq!(page.html, "<p>hi</p>");

        let missing = fetcher.fetch("https://example.org/missing").await;
        assert!(matches!(missing, Err(CrawlError::Status { status: 404, .. })));
        assert_eq!(fetcher.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_model_matches_substring() {
        let model = MockLanguageModel::new()
            .with_response("Seed", r#"{"grant_name": "Seed Grant"}"#)
            .with_default("nothing");

        let hit = model
            .complete(CompletionRequest::new("sys", "page about Seed funding"))
            .await
            .unwrap();
        let miss = model
            .complete(CompletionRequest::new("sys", "unrelated"))
            .await
            .unwrap();

        assert_eq!(hit, r#"{"grant_name": "Seed Grant"}"#);
        assert_eq!(miss, "nothing");
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_model_still_records_calls() {
        let model = MockLanguageModel::failing();
        assert!(model.complete(CompletionRequest::new("s", "p")).await.is_err());
        assert_eq!(model.calls().len(), 1);
    }
}
