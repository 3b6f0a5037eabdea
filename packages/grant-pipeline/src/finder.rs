//! Organization URL finder.
//!
//! Given only a foundation's name, search the web, let the model pick the
//! official site out of the results, and accept the pick only if the page
//! loads and looks like a grant maker. Each attempt uses a different query.
//!
//! ```rust,ignore
//! let finder = UrlFinder::new(searcher, model, fetcher).with_max_attempts(3);
//! let outcome = finder.find("Mathers Foundation", None).await;
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};
use url::Url;

use crate::prompts::{format_url_finder_prompt, format_url_finder_system, DIRECTORY_DOMAINS};
use crate::traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
    searcher::WebSearcher,
};

const FINDER_TEMPERATURE: f32 = 0.1;
const DEFAULT_SEARCH_LIMIT: usize = 10;
const EXHAUSTED: &str = "Could not find a valid URL after maximum attempts";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap()
});
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}").unwrap()
});

/// Result of a [`UrlFinder::find`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFinderOutcome {
    pub success: bool,
    pub url: Option<String>,
    /// Search attempts actually made.
    pub attempts: usize,
    pub error: Option<String>,
}

pub struct UrlFinder {
    searcher: Arc<dyn WebSearcher>,
    model: Arc<dyn LanguageModel>,
    fetcher: Arc<dyn PageFetcher>,
    max_attempts: usize,
    search_limit: usize,
}

impl UrlFinder {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        model: Arc<dyn LanguageModel>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            searcher,
            model,
            fetcher,
            max_attempts: 1,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Search, pick, validate; repeat with the next query until a URL
    /// validates or attempts run out. Search and model errors end the run.
    pub async fn find(
        &self,
        organization_name: &str,
        foundation_data: Option<&Map<String, Value>>,
    ) -> UrlFinderOutcome {
        let system = format_url_finder_system(&foundation_info(foundation_data));
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let query = search_query(organization_name, attempts);
            attempts += 1;
            info!(organization = %organization_name, query = %query, attempt = attempts, "Searching for organization URL");

            let results = match self.searcher.search_with_limit(&query, self.search_limit).await {
                Ok(results) => results,
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                    return failure(attempts, format!("Search failed: {}", e));
                }
            };

            let listed: Vec<(String, String)> = results
                .iter()
                .map(|r| {
                    let content = r.snippet.clone().or_else(|| r.title.clone()).unwrap_or_default();
                    (r.url.to_string(), content)
                })
                .collect();

            let request = CompletionRequest::new(
                system.clone(),
                format_url_finder_prompt(organization_name, &query, &listed),
            )
            .with_temperature(FINDER_TEMPERATURE);

            let reply = match self.model.complete(request).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "URL selection failed");
                    return failure(attempts, format!("Processing failed: {}", e));
                }
            };

            for candidate in extract_urls(&reply) {
                if is_directory_site(&candidate) {
                    debug!(url = %candidate, "Skipping directory site");
                    continue;
                }
                if let Some(url) = self.validate(&candidate).await {
                    info!(organization = %organization_name, url = %url, attempts, "Organization URL found");
                    return UrlFinderOutcome {
                        success: true,
                        url: Some(url),
                        attempts,
                        error: None,
                    };
                }
            }
        }

        failure(attempts, EXHAUSTED.to_string())
    }

    /// The normalized URL when it loads and mentions grants or a foundation.
    pub async fn validate(&self, candidate: &str) -> Option<String> {
        let url = normalize_candidate(candidate);

        match self.fetcher.fetch(&url).await {
            Ok(page) => {
                let body = page.html.to_lowercase();
                if body.contains("grant") || body.contains("foundation") {
                    Some(url)
                } else {
                    debug!(url = %url, "Page does not look like a grant maker");
                    None
                }
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Candidate URL failed to load");
                None
            }
        }
    }
}

/// Query for the zero-based attempt index; the last one repeats.
pub fn search_query(organization_name: &str, attempt: usize) -> String {
    match attempt {
        0 => format!("{} foundation official website", organization_name),
        1 => format!("{} foundation .org", organization_name),
        _ => format!("{} grants foundation homepage", organization_name),
    }
}

/// URLs in the model reply, else bare domains.
pub fn extract_urls(text: &str) -> Vec<String> {
    let urls: Vec<String> = URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ')', '\'']).to_string())
        .collect();
    if !urls.is_empty() {
        return urls;
    }
    DOMAIN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn normalize_candidate(candidate: &str) -> String {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_string()
    } else {
        format!("https://{}", candidate)
    }
}

fn is_directory_site(candidate: &str) -> bool {
    let Ok(url) = Url::parse(&normalize_candidate(candidate)) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    DIRECTORY_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

fn foundation_info(data: Option<&Map<String, Value>>) -> Vec<(String, String)> {
    data.map(|map| {
        map.iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    })
    .unwrap_or_default()
}

fn failure(attempts: usize, error: String) -> UrlFinderOutcome {
    UrlFinderOutcome {
        success: false,
        url: None,
        attempts,
        error: Some(error),
    }
}
