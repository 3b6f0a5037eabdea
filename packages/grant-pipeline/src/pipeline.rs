//! End-to-end run: grants, organization, description, metadata.

use std::sync::Arc;
use tracing::{info, warn};

use crate::collectors::{GrantCollector, OrganizationCollector};
use crate::error::{PipelineError, Result};
use crate::traits::{ai::LanguageModel, fetcher::PageFetcher};
use crate::types::{
    config::{CrawlConfig, PipelineRequest},
    grant::Grant,
    organization::Organization,
    report::PipelineOutcome,
};
use crate::writers::{DescriptionWriter, MetadataWriter};

pub struct GrantPipeline {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn LanguageModel>,
    crawl_config: CrawlConfig,
}

impl GrantPipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            fetcher,
            model,
            crawl_config: CrawlConfig::default(),
        }
    }

    pub fn with_crawl_config(mut self, config: CrawlConfig) -> Self {
        self.crawl_config = config;
        self
    }

    /// Grants for `foundation_url`, at most `max_grants`. `None` or `Some(0)` is unlimited.
    pub async fn collect_grants(
        &self,
        foundation_url: &str,
        max_grants: Option<usize>,
    ) -> Result<Vec<Grant>> {
        GrantCollector::new(self.fetcher.clone(), self.model.clone())
            .with_config(self.crawl_config.clone())
            .with_max_grants(max_grants)
            .collect(foundation_url)
            .await
    }

    pub async fn collect_organization(&self, foundation_url: &str) -> Result<Option<Organization>> {
        OrganizationCollector::new(self.fetcher.clone(), self.model.clone())
            .with_config(self.crawl_config.clone())
            .collect(foundation_url)
            .await
    }

    pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineOutcome> {
        let url = request.foundation_url.as_str();
        info!(url = %url, max_grants = ?request.max_grants, include_org_data = request.include_org_data, "Starting grant pipeline");

        // Step 1: grants
        let grants = self.collect_grants(url, request.max_grants).await?;
        if grants.is_empty() {
            return Err(PipelineError::NoGrantsFound { url: url.to_string() });
        }
        info!(url = %url, grants = grants.len(), "Step 1 complete: grants collected");

        // Step 2: organization, optional and non-fatal
        let organization = if request.include_org_data {
            match self.collect_organization(url).await {
                Ok(org) => org,
                Err(e) => {
                    warn!(url = %url, error = %e, "Organization collection failed, continuing without it");
                    None
                }
            }
        } else {
            None
        };
        info!(url = %url, organization = organization.is_some(), "Step 2 complete");

        // Step 3: consolidated description
        let consolidated = DescriptionWriter::new(self.model.clone())
            .process_grants_consolidated(&grants, organization.as_ref())
            .await?;
        if consolidated.is_empty() {
            return Err(PipelineError::NoActiveGrants { total: grants.len() });
        }
        info!(url = %url, active = consolidated.grant_count, "Step 3 complete: description written");

        // Step 4: metadata
        let metadata = MetadataWriter::new(self.model.clone())
            .generate(&consolidated.description)
            .await?;
        info!(url = %url, "Step 4 complete: metadata generated");

        Ok(PipelineOutcome {
            grants_data: grants,
            organization_data: organization,
            consolidated_description: consolidated.description.clone(),
            metadata,
            consolidated,
        })
    }
}
