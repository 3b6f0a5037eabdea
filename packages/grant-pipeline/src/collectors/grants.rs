//! Per-page grant extraction.

use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use super::EXTRACTION_TEMPERATURE;
use crate::crawl::{discover, go_one_level_deeper, Keywords};
use crate::error::{CrawlResult, Result};
use crate::llm::{parse_model_json, ModelJsonError};
use crate::prompts::{format_grant_prompt, GRANT_SYSTEM};
use crate::text::extract_page_text;
use crate::traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
};
use crate::types::{config::CrawlConfig, grant::Grant};

/// Collects grants from the grant-related pages of one site.
pub struct GrantCollector {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn LanguageModel>,
    config: CrawlConfig,
    keywords: Keywords,
    max_grants: Option<usize>,
}

impl GrantCollector {
    pub fn new(fetcher: Arc<dyn PageFetcher>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            fetcher,
            model,
            config: CrawlConfig::default(),
            keywords: Keywords::grant(),
            max_grants: None,
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Stop once this many grants have been kept. `None` and `Some(0)` mean no limit.
    pub fn with_max_grants(mut self, max_grants: Option<usize>) -> Self {
        self.max_grants = max_grants.filter(|&max| max > 0);
        self
    }

    /// Candidate pages for `root`, one level deeper when configured.
    pub async fn candidate_links(&self, root: &str) -> CrawlResult<Vec<Url>> {
        let links = discover(self.fetcher.as_ref(), root, &self.keywords, &self.config).await?;
        if !self.config.go_deeper {
            return Ok(links);
        }
        Ok(go_one_level_deeper(self.fetcher.as_ref(), &links, root, &self.keywords, &self.config).await)
    }

    /// Run the full loop for one foundation.
    ///
    /// Only a failed root fetch is an error. Every per-page failure is
    /// logged and the page contributes nothing.
    pub async fn collect(&self, root: &str) -> Result<Vec<Grant>> {
        let links = self.candidate_links(root).await?;
        info!(url = %root, candidates = links.len(), "Collecting grants");

        let mut grants = Vec::new();
        for link in &links {
            if self.max_grants.is_some_and(|max| grants.len() >= max) {
                debug!(max = ?self.max_grants, "Grant limit reached");
                break;
            }

            match self.extract_from_page(link).await {
                Ok(Some(grant)) => {
                    info!(url = %link, grant = %grant.grant_name, "Grant extracted");
                    grants.push(grant);
                }
                Ok(None) => debug!(url = %link, "No grant on page"),
                Err(e) => warn!(url = %link, error = %e, "Grant extraction failed"),
            }
        }

        info!(url = %root, grants = grants.len(), "Grant collection completed");
        Ok(grants)
    }

    /// Fetch one page and extract at most one grant from it.
    pub async fn extract_from_page(&self, url: &Url) -> Result<Option<Grant>> {
        if !matches!(url.scheme(), "http" | "https") {
            debug!(url = %url, "Skipping non-http link");
            return Ok(None);
        }

        let page = self.fetcher.fetch(url.as_str()).await?;
        let text = extract_page_text(&page.html);
        if text.is_empty() {
            debug!(url = %url, "No text extracted, skipping page");
            return Ok(None);
        }

        self.extract_from_text(&text.text, url.as_str()).await
    }

    /// Ask the model for a grant in `text` and apply the keep rules.
    pub async fn extract_from_text(&self, text: &str, url: &str) -> Result<Option<Grant>> {
        let request = CompletionRequest::new(GRANT_SYSTEM, format_grant_prompt(text))
            .with_temperature(EXTRACTION_TEMPERATURE);
        let reply = self.model.complete(request).await?;

        let grant = match parse_model_json::<Grant>(&reply) {
            Ok(grant) => grant,
            Err(ModelJsonError::Empty) => return Ok(None),
            Err(e) => {
                warn!(url = %url, error = %e, "Unparsable grant output");
                return Ok(None);
            }
        };

        if !grant.has_name() {
            debug!(url = %url, "Discarding grant without a name");
            return Ok(None);
        }
        if grant.is_closed() {
            info!(url = %url, deadline = %grant.proposal_deadline, "Skipping closed grant");
            return Ok(None);
        }

        Ok(Some(grant.with_url(url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFetcher, MockLanguageModel};

    const ROOT: &str = "https://examplefoundation.org/";

    fn site() -> MockFetcher {
        MockFetcher::new()
            .with_page(
                ROOT,
                r#"<html><body>
                    <a href="/grants/arts">Arts</a>
                    <a href="/grants/closed">Old</a>
                    <a href="/grants/broken">Broken</a>
                    <a href="/grants/missing">Missing</a>
                    <a href="/news">News</a>
                </body></html>"#,
            )
            .with_page(
                "https://examplefoundation.org/grants/arts",
                "<main><h1>Community Arts Grant</h1><p>Up to $5,000.</p></main>",
            )
            .with_page(
                "https://examplefoundation.org/grants/closed",
                "<main><h1>Legacy Fund</h1><p>This cycle is closed.</p></main>",
            )
            .with_page(
                "https://examplefoundation.org/grants/broken",
                "<main><p>Broken reply page</p></main>",
            )
    }

    fn model() -> MockLanguageModel {
        MockLanguageModel::new()
            .with_response(
                "Community Arts Grant",
                r#"```json
{"grant_name": "Community Arts Grant", "grant_amount": 5000, "proposal_deadline": "March 1, 2026"}
```"#,
            )
            .with_response(
                "Legacy Fund",
                r#"{"grant_name": "Legacy Fund", "proposal_deadline": "Closed"}"#,
            )
            .with_response("Broken reply page", "I am not JSON")
    }

    #[tokio::test]
    async fn test_collect_keeps_only_named_open_grants() {
        let collector = GrantCollector::new(Arc::new(site()), Arc::new(model()));

        let grants = collector.collect(ROOT).await.unwrap();

        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].grant_name, "Community Arts Grant");
        assert_eq!(grants[0].grant_amount, "5000");
        assert_eq!(grants[0].grant_url, "https://examplefoundation.org/grants/arts");
    }

    #[tokio::test]
    async fn test_collect_uses_extraction_temperature() {
        let model = Arc::new(model());
        let collector = GrantCollector::new(Arc::new(site()), model.clone());

        collector.collect(ROOT).await.unwrap();

        // Root plus the three fetchable grant pages; the missing one never
        // reaches the model.
        let calls = model.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|c| c.temperature == 0.3));
        assert!(calls[0].system.contains("expert grant writer"));
    }

    #[tokio::test]
    async fn test_max_grants_stops_early() {
        let model = Arc::new(MockLanguageModel::new().with_default(r#"{"grant_name": "Any Grant"}"#));
        let collector = GrantCollector::new(Arc::new(site()), model.clone()).with_max_grants(Some(2));

        let grants = collector.collect(ROOT).await.unwrap();

        assert_eq!(grants.len(), 2);
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_or_missing_limit_keeps_everything() {
        for limit in [None, Some(0)] {
            let model = Arc::new(MockLanguageModel::new().with_default(r#"{"grant_name": "Any Grant"}"#));
            let collector =
                GrantCollector::new(Arc::new(site()), model.clone()).with_max_grants(limit);

            let grants = collector.collect(ROOT).await.unwrap();

            assert_eq!(grants.len(), 4, "limit {:?}", limit);
            assert_eq!(model.call_count(), 4);
        }
    }

    #[tokio::test]
    async fn test_empty_page_never_reaches_model() {
        let fetcher = MockFetcher::new().with_page(ROOT, "");
        let model = Arc::new(MockLanguageModel::new().with_default(r#"{"grant_name": "Invented Grant"}"#));
        let collector = GrantCollector::new(Arc::new(fetcher), model.clone());

        let grants = collector.collect(ROOT).await.unwrap();

        assert!(grants.is_empty());
        assert_eq!(model.call_count(), 0);
    }

    fn nested_site() -> MockFetcher {
        MockFetcher::new()
            .with_page(ROOT, r#"<a href="/funding">Funding</a>"#)
            .with_page(
                "https://examplefoundation.org/funding",
                r#"<a href="/funding/youth-grant">Youth</a>
                   <a href="/funding">Funding</a>"#,
            )
            .with_page(
                "https://examplefoundation.org/funding/youth-grant",
                "<main><h1>Youth Mentoring Grant</h1><p>Rolling deadline.</p></main>",
            )
    }

    #[tokio::test]
    async fn test_go_deeper_finds_nested_grant_page() {
        let fetcher = Arc::new(nested_site());
        let model = Arc::new(MockLanguageModel::new().with_response(
            "Youth Mentoring Grant",
            r#"{"grant_name": "Youth Mentoring Grant", "proposal_deadline": "Rolling"}"#,
        ));
        let collector = GrantCollector::new(fetcher.clone(), model.clone())
            .with_config(CrawlConfig::default().with_go_deeper(true));

        let links: Vec<String> = collector
            .candidate_links(ROOT)
            .await
            .unwrap()
            .iter()
            .map(|u| u.to_string())
            .collect();
        assert_eq!(
            links,
            vec![
                ROOT.to_string(),
                "https://examplefoundation.org/funding".to_string(),
                "https://examplefoundation.org/funding/youth-grant".to_string(),
            ]
        );

        let grants = collector.collect(ROOT).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].grant_name, "Youth Mentoring Grant");
        assert_eq!(
            grants[0].grant_url,
            "https://examplefoundation.org/funding/youth-grant"
        );
        assert!(fetcher
            .fetched()
            .contains(&"https://examplefoundation.org/funding/youth-grant".to_string()));
    }

    #[tokio::test]
    async fn test_without_go_deeper_nested_page_is_missed() {
        let collector = GrantCollector::new(Arc::new(nested_site()), Arc::new(MockLanguageModel::new()));

        let links = collector.candidate_links(ROOT).await.unwrap();

        assert_eq!(links.len(), 2);
    }

    #[tokio::test]
    async fn test_model_failure_skips_page() {
        let collector = GrantCollector::new(Arc::new(site()), Arc::new(MockLanguageModel::failing()));
        let grants = collector.collect(ROOT).await.unwrap();
        assert!(grants.is_empty());
    }

    #[tokio::test]
    async fn test_root_failure_is_an_error() {
        let collector = GrantCollector::new(Arc::new(MockFetcher::new()), Arc::new(model()));
        assert!(collector.collect(ROOT).await.is_err());
    }

    #[tokio::test]
    async fn test_placeholder_name_is_discarded() {
        let collector = GrantCollector::new(
            Arc::new(MockFetcher::new()),
            Arc::new(MockLanguageModel::new().with_default(r#"{"grant_name": "Not specified"}"#)),
        );
        let grant = collector
            .extract_from_text("some text", "https://example.org/x")
            .await
            .unwrap();
        assert!(grant.is_none());
    }

    #[tokio::test]
    async fn test_empty_object_yields_nothing() {
        let collector = GrantCollector::new(Arc::new(MockFetcher::new()), Arc::new(MockLanguageModel::new()));
        let grant = collector
            .extract_from_text("some text", "https://example.org/x")
            .await
            .unwrap();
        assert!(grant.is_none());
    }
}
