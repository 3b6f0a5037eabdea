//! Organization profile extraction.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::EXTRACTION_TEMPERATURE;
use crate::crawl::{discover, Keywords};
use crate::error::Result;
use crate::llm::{parse_model_json, ModelJsonError};
use crate::prompts::{format_organization_prompt, ORGANIZATION_SYSTEM};
use crate::text::extract_page_text;
use crate::traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
};
use crate::types::{config::CrawlConfig, organization::Organization};

/// Builds one [`Organization`] from the about/contact style pages of a site.
pub struct OrganizationCollector {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn LanguageModel>,
    config: CrawlConfig,
    keywords: Keywords,
}

impl OrganizationCollector {
    pub fn new(fetcher: Arc<dyn PageFetcher>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            fetcher,
            model,
            config: CrawlConfig::default(),
            keywords: Keywords::organization(),
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

    /// `Ok(None)` when no page could be read or the model gave nothing usable.
    pub async fn collect(&self, root: &str) -> Result<Option<Organization>> {
        let links = discover(self.fetcher.as_ref(), root, &self.keywords, &self.config).await?;
        info!(url = %root, candidates = links.len(), "Collecting organization pages");

        let mut texts = Vec::new();
        for link in &links {
            match self.fetcher.fetch(link.as_str()).await {
                Ok(page) => {
                    let text = extract_page_text(&page.html);
                    if !text.is_empty() {
                        texts.push(text.text);
                    }
                }
                Err(e) => warn!(url = %link, error = %e, "Organization page fetch failed"),
            }
        }

        if texts.is_empty() {
            warn!(url = %root, "No organization page text collected");
            return Ok(None);
        }

        self.extract_from_texts(&texts).await
    }

    /// One model call over every page text.
    pub async fn extract_from_texts(&self, texts: &[String]) -> Result<Option<Organization>> {
        debug!(pages = texts.len(), "Extracting organization");

        let request = CompletionRequest::new(ORGANIZATION_SYSTEM, format_organization_prompt(texts))
            .with_temperature(EXTRACTION_TEMPERATURE);
        let reply = self.model.complete(request).await?;

        let org = match parse_model_json::<Organization>(&reply) {
            Ok(org) => org,
            Err(ModelJsonError::Empty) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Unparsable organization output");
                return Ok(None);
            }
        };

        if !org.has_name() {
            warn!("Organization extracted without a name");
        } else {
            info!(org = %org.org_name, "Organization extracted");
        }
        Ok(Some(org))
    }
}
