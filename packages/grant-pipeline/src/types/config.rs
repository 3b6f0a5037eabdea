//! Crawl and pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser-like agent; several foundation sites refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for link discovery and page fetching.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Per-request timeout. Default: 10 seconds.
    pub timeout: Duration,

    /// Maximum redirects followed per request. Default: 5.
    pub max_redirects: usize,

    /// Cap on the candidate set, root included. `None` = unbounded.
    pub max_pages: Option<usize>,

    /// Drop candidates whose host differs from the page they were found on.
    ///
    /// Default: false, matching the plain keyword filter.
    pub same_host_only: bool,

    /// Run discovery again on every candidate and merge the results.
    pub go_deeper: bool,

    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            max_pages: Some(50),
            same_host_only: false,
            go_deeper: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_same_host_only(mut self, same_host_only: bool) -> Self {
        self.same_host_only = same_host_only;
        self
    }

    pub fn with_go_deeper(mut self, go_deeper: bool) -> Self {
        self.go_deeper = go_deeper;
        self
    }
}

fn default_max_grants() -> Option<usize> {
    Some(10)
}

fn default_include_org_data() -> bool {
    true
}

/// Input to a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub foundation_url: String,

    /// Grants beyond this many are dropped. `null` or `0` means no limit.
    #[serde(default = "default_max_grants")]
    pub max_grants: Option<usize>,

    #[serde(default = "default_include_org_data")]
    pub include_org_data: bool,
}

impl PipelineRequest {
    pub fn new(foundation_url: impl Into<String>) -> Self {
        Self {
            foundation_url: foundation_url.into(),
            max_grants: default_max_grants(),
            include_org_data: default_include_org_data(),
        }
    }

    pub fn with_max_grants(mut self, max_grants: Option<usize>) -> Self {
        self.max_grants = max_grants;
        self
    }

    pub fn without_org_data(mut self) -> Self {
        self.include_org_data = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.max_pages, Some(50));
        assert!(!config.go_deeper);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let req: PipelineRequest =
            serde_json::from_str(r#"{"foundation_url":"https://example.org"}"#).unwrap();
        assert_eq!(req.max_grants, Some(10));
        assert!(req.include_org_data);
    }

    #[test]
    fn test_request_accepts_null_max_grants() {
        let req: PipelineRequest =
            serde_json::from_str(r#"{"foundation_url":"https://example.org","max_grants":null}"#)
                .unwrap();
        assert_eq!(req.max_grants, None);

        let req: PipelineRequest =
            serde_json::from_str(r#"{"foundation_url":"https://example.org","max_grants":0}"#)
                .unwrap();
        assert_eq!(req.max_grants, Some(0));
    }
}
