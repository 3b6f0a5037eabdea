//! Writer and pipeline outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{grant::Grant, metadata::GrantMetadata, organization::Organization};

pub const NO_ACTIVE_GRANTS_TITLE: &str = "No Active Grants Available";
pub const NO_ACTIVE_GRANTS_DESCRIPTION: &str =
    "No active grant opportunities are currently available.";
pub const CONSOLIDATED_TITLE: &str = "Consolidated Grant Opportunities";

/// One description covering every active grant of a foundation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedDescription {
    pub title: String,
    pub description: String,
    pub grant_count: usize,
    pub grant_names: Vec<String>,
    #[serde(default)]
    pub source_urls: Vec<String>,
    pub org_data: Option<Organization>,
}

impl ConsolidatedDescription {
    /// Result when every grant was filtered out as expired.
    pub fn no_active_grants(org_data: Option<Organization>) -> Self {
        Self {
            title: NO_ACTIVE_GRANTS_TITLE.to_string(),
            description: NO_ACTIVE_GRANTS_DESCRIPTION.to_string(),
            grant_count: 0,
            grant_names: Vec::new(),
            source_urls: Vec::new(),
            org_data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grant_count == 0
    }
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub grants_data: Vec<Grant>,
    pub organization_data: Option<Organization>,
    /// Markdown body of `consolidated`
    pub consolidated_description: String,
    pub metadata: GrantMetadata,
    #[serde(skip)]
    pub consolidated: ConsolidatedDescription,
}

/// File-friendly report written by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub pipeline_info: PipelineInfo,
    pub grant_opportunity_description: String,
    pub grant_metadata: GrantMetadata,
    pub source_data: SourceData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub run_id: Uuid,
    pub foundation_url: String,
    pub grants_processed: usize,
    pub organization_data_available: bool,
    /// YYYY-MM-DD
    pub processing_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceData {
    pub grants_count: usize,
    pub grant_names: Vec<String>,
    pub source_urls: Vec<String>,
    pub organization_name: Option<String>,
}

impl ConsolidatedReport {
    pub fn from_outcome(
        foundation_url: impl Into<String>,
        outcome: &PipelineOutcome,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pipeline_info: PipelineInfo {
                run_id: Uuid::now_v7(),
                foundation_url: foundation_url.into(),
                grants_processed: outcome.grants_data.len(),
                organization_data_available: outcome.organization_data.is_some(),
                processing_date: processed_at.format("%Y-%m-%d").to_string(),
            },
            grant_opportunity_description: outcome.consolidated.description.clone(),
            grant_metadata: outcome.metadata.clone(),
            source_data: SourceData {
                grants_count: outcome.grants_data.len(),
                grant_names: outcome.consolidated.grant_names.clone(),
                source_urls: outcome.consolidated.source_urls.clone(),
                organization_name: outcome
                    .organization_data
                    .as_ref()
                    .map(|org| org.org_name.clone()),
            },
        }
    }
}
