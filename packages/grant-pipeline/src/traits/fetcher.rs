//! Page fetcher trait and its SSRF-checking wrapper.
//!
//! Always wrap the HTTP fetcher with [`ValidatedFetcher`] when URLs come
//! from users or from scraped pages:
//!
//! ```rust,ignore
//! let fetcher = ValidatedFetcher::new(HttpFetcher::new()?);
//! let page = fetcher.fetch("https://examplefoundation.org").await?;
//! ```

use async_trait::async_trait;

use crate::error::{CrawlError, CrawlResult};
use crate::security::UrlValidator;
use crate::types::page::FetchedPage;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET a single URL. Anything other than a 200 response is an error.
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage>;

    fn name(&self) -> &str {
        "unknown"
    }
}

/// A fetcher that validates every URL, before the request and after
/// redirects.
pub struct ValidatedFetcher<F: PageFetcher> {
    inner: F,
    validator: UrlValidator,
}

impl<F: PageFetcher> ValidatedFetcher<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: fetcher,
            validator: UrlValidator::new(),
        }
    }

    pub fn with_validator(fetcher: F, validator: UrlValidator) -> Self {
        Self {
            inner: fetcher,
            validator,
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for ValidatedFetcher<F> {
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage> {
        self.validator
            .validate_with_dns(url)
            .await
            .map_err(CrawlError::Security)?;

        let page = self.inner.fetch(url).await?;

        // A public page may redirect somewhere internal.
        if page.final_url != page.url {
            self.validator
                .validate(&page.final_url)
                .map_err(CrawlError::Security)?;
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
