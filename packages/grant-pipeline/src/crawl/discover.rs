//! Candidate-set construction.

use indexmap::IndexSet;
use tracing::{debug, info, warn};
use url::Url;

use super::links::{extract_hrefs, normalize_root, resolve_link, Keywords};
use crate::error::{CrawlError, CrawlResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::CrawlConfig;

/// Build the candidate set for one root page.
///
/// The root is fetched, every anchor whose raw href matches `keywords` is
/// resolved against the page, and the result is deduplicated in first-seen
/// order with the root always first. A failed root fetch is an error.
pub async fn discover(
    fetcher: &dyn PageFetcher,
    root: &str,
    keywords: &Keywords,
    config: &CrawlConfig,
) -> CrawlResult<Vec<Url>> {
    let root_url = normalize_root(root).ok_or_else(|| CrawlError::InvalidUrl {
        url: root.to_string(),
    })?;

    info!(url = %root_url, "Discovering candidate links");

    let page = fetcher.fetch(root_url.as_str()).await?;

    // Relative links resolve against where we actually landed.
    let base = Url::parse(&page.final_url).unwrap_or_else(|_| root_url.clone());

    let hrefs = extract_hrefs(&page.html);
    debug!(url = %root_url, total_links = hrefs.len(), "Extracted anchors");

    let mut candidates: IndexSet<Url> = IndexSet::new();
    candidates.insert(root_url.clone());

    for href in &hrefs {
        if !keywords.matches(href) {
            continue;
        }
        let Some(resolved) = resolve_link(&base, href) else {
            debug!(href = %href, "Skipping unresolvable link");
            continue;
        };
        if config.same_host_only && resolved.host_str() != base.host_str() {
            debug!(link = %resolved, "Skipping off-site link");
            continue;
        }
        if candidates.insert(resolved.clone()) {
            debug!(href = %href, link = %resolved, "Candidate link");
        }
    }

    let candidates = cap(candidates, config.max_pages);

    info!(
        url = %root_url,
        candidates = candidates.len(),
        "Link discovery completed"
    );

    Ok(candidates)
}

/// Run [`discover`] on every candidate except the root and merge.
///
/// Sub-page failures are logged and skipped; the seed candidates keep
/// their positions ahead of anything found one level down.
pub async fn go_one_level_deeper(
    fetcher: &dyn PageFetcher,
    links: &[Url],
    root: &str,
    keywords: &Keywords,
    config: &CrawlConfig,
) -> Vec<Url> {
    let root_url = normalize_root(root);
    let mut merged: IndexSet<Url> = links.iter().cloned().collect();

    for link in links {
        if Some(link) == root_url.as_ref() {
            continue;
        }
        match discover(fetcher, link.as_str(), keywords, config).await {
            Ok(found) => {
                debug!(link = %link, found = found.len(), "Sub-page discovery");
                merged.extend(found);
            }
            Err(e) => {
                warn!(link = %link, error = %e, "Sub-page discovery failed");
            }
        }
    }

    let merged = cap(merged, config.max_pages);
    info!(
        seeds = links.len(),
        candidates = merged.len(),
        "Deeper discovery completed"
    );
    merged
}

fn cap(set: IndexSet<Url>, max_pages: Option<usize>) -> Vec<Url> {
    let mut urls: Vec<Url> = set.into_iter().collect();
    if let Some(max) = max_pages {
        // The root sits at index 0 and always survives.
        urls.truncate(max.max(1));
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    const ROOT: &str = "https://examplefoundation.org/";

    fn home_page() -> &'static str {
        r##"
        <html><body>
          <nav>
            <a href="/about">About</a>
            <a href="/grants">Grants</a>
            <a href="/grants#apply">Apply now</a>
            <a href="https://examplefoundation.org/grants">Grants again</a>
            <a href="/news">News</a>
            <a href="mailto:grants@examplefoundation.org">Email grants</a>
            <a href="https://partner.org/funding">Partner funding</a>
          </nav>
        </body></html>
        "##
    }

    #[tokio::test]
    async fn test_discover_filters_dedupes_and_keeps_root_first() {
        let fetcher = MockFetcher::new().with_page(ROOT, home_page());

        let links = discover(&fetcher, ROOT, &Keywords::grant(), &CrawlConfig::default())
            .await
            .unwrap();

        let links: Vec<&str> = links.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://examplefoundation.org/",
                "https://examplefoundation.org/about",
                "https://examplefoundation.org/grants",
                "https://partner.org/funding",
            ]
        );
    }

    #[tokio::test]
    async fn test_root_included_when_no_anchor_matches() {
        let fetcher = MockFetcher::new().with_page(ROOT, "<a href='/news'>News</a>");

        let links = discover(&fetcher, ROOT, &Keywords::grant(), &CrawlConfig::default())
            .await
            .unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), ROOT);
    }

    #[tokio::test]
    async fn test_same_host_only() {
        let fetcher = MockFetcher::new().with_page(ROOT, home_page());
        let config = CrawlConfig::default().with_same_host_only(true);

        let links = discover(&fetcher, ROOT, &Keywords::grant(), &config)
            .await
            .unwrap();

        assert!(links.iter().all(|u| u.host_str() == Some("examplefoundation.org")));
    }

    #[tokio::test]
    async fn test_max_pages_keeps_root() {
        let fetcher = MockFetcher::new().with_page(ROOT, home_page());
        let config = CrawlConfig::default().with_max_pages(Some(2));

        let links = discover(&fetcher, ROOT, &Keywords::grant(), &config)
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].as_str(), ROOT);
    }

    #[tokio::test]
    async fn test_links_resolve_against_redirect_target() {
        let fetcher = MockFetcher::new().with_redirect(
            "https://examplefoundation.org/",
            "https://www.examplefoundation.org/home/",
            "<a href='grants'>Grants</a>",
        );

        let links = discover(&fetcher, ROOT, &Keywords::grant(), &CrawlConfig::default())
            .await
            .unwrap();

        assert_eq!(
            links[1].as_str(),
            "https://www.examplefoundation.org/home/grants"
        );
    }

    #[tokio::test]
    async fn test_root_fetch_failure_propagates() {
        let fetcher = MockFetcher::new();
        let result = discover(&fetcher, ROOT, &Keywords::grant(), &CrawlConfig::default()).await;
        assert!(matches!(result, Err(CrawlError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_invalid_root() {
        let fetcher = MockFetcher::new();
        let result = discover(&fetcher, "not a url", &Keywords::grant(), &CrawlConfig::default()).await;
        assert!(matches!(result, Err(CrawlError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_go_one_level_deeper_merges_and_skips_failures() {
        let fetcher = MockFetcher::new()
            .with_page(ROOT, home_page())
            .with_page(
                "https://examplefoundation.org/grants",
                "<a href='/grants/arts'>Arts</a><a href='/about'>About</a>",
            )
            .with_page(
                "https://examplefoundation.org/about",
                "<a href='/scholarship'>Scholarship</a>",
            );
        // partner.org is not registered, so its discovery fails.
        let config = CrawlConfig::default();
        let keywords = Keywords::grant();

        let first = discover(&fetcher, ROOT, &keywords, &config).await.unwrap();
        let all = go_one_level_deeper(&fetcher, &first, ROOT, &keywords, &config).await;

        let all: Vec<&str> = all.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            all,
            vec![
                "https://examplefoundation.org/",
                "https://examplefoundation.org/about",
                "https://examplefoundation.org/grants",
                "https://partner.org/funding",
                "https://examplefoundation.org/scholarship",
                "https://examplefoundation.org/grants/arts",
            ]
        );
    }
}
