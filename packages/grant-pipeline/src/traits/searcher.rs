//! Web search trait used by the organization URL finder.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use url::Url;

use crate::error::{PipelineError, Result};
use crate::security::SecretString;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// A search hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub url: Url,
    pub title: Option<String>,
    /// Short content excerpt from the provider.
    pub snippet: Option<String>,
    /// Relevance score (0.0-1.0) when the provider reports one.
    pub score: Option<f32>,
}

impl SearchResult {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            snippet: None,
            score: None,
        }
    }

    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url).ok().map(Self::new)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    async fn search_with_limit(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let mut results = self.search(query).await?;
        results.truncate(limit);
        Ok(results)
    }
}

/// Mock web searcher keyed by exact query string.
#[derive(Default)]
pub struct MockWebSearcher {
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    queries: RwLock<Vec<String>>,
    fail: bool,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A searcher whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(query.to_string(), results);
        self
    }

    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let results: Vec<_> = urls
            .iter()
            .filter_map(|u| SearchResult::from_url(u))
            .collect();
        self.with_results(query, results)
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.queries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.to_string());

        if self.fail {
            return Err(PipelineError::search("mock search failure"));
        }

        Ok(self
            .results
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Tavily-backed web searcher.
pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    /// Results requested per query. Default: 10.
    pub default_limit: usize,
}

impl TavilyWebSearcher {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            client: reqwest::Client::new(),
            default_limit: 10,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_with_limit(query, self.default_limit).await
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            query: &'a str,
            search_depth: &'a str,
            max_results: usize,
            include_answer: bool,
            include_raw_content: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            results: Vec<TavilyResult>,
        }

        #[derive(serde::Deserialize)]
        struct TavilyResult {
            url: String,
            title: Option<String>,
            content: Option<String>,
            score: Option<f32>,
        }

        let request = Request {
            query,
            search_depth: "basic",
            max_results: limit,
            include_answer: true,
            include_raw_content: true,
        };

        tracing::debug!(query = %query, limit, "Tavily search");

        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(PipelineError::search)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::search(format!(
                "Tavily API error {}: {}",
                status, body
            )));
        }

        let tavily: Response = response.json().await.map_err(PipelineError::search)?;

        let results = tavily
            .results
            .into_iter()
            .filter_map(|r| {
                let mut result = SearchResult::from_url(&r.url)?;
                if let Some(title) = r.title {
                    result = result.with_title(title);
                }
                if let Some(content) = r.content {
                    result = result.with_snippet(content);
                }
                if let Some(score) = r.score {
                    result = result.with_score(score);
                }
                Some(result)
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_web_searcher() {
        let searcher = MockWebSearcher::new().with_urls(
            "Mathers foundation official website",
            &["https://mathersfoundation.org/", "https://www.guidestar.org/x"],
        );

        let results = searcher
            .search("Mathers foundation official website")
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url.as_str(), "https://mathersfoundation.org/");
        assert_eq!(searcher.queries(), vec!["Mathers foundation official website"]);
    }

    #[tokio::test]
    async fn test_unknown_query_is_empty() {
        let searcher = MockWebSearcher::new();
        assert!(searcher.search("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_limit() {
        let searcher = MockWebSearcher::new().with_urls(
            "q",
            &["https://a.org", "https://b.org", "https://c.org"],
        );
        let results = searcher.search_with_limit("q", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_searcher() {
        let searcher = MockWebSearcher::failing();
        assert!(matches!(
            searcher.search("q").await,
            Err(PipelineError::Search(_))
        ));
    }
}
