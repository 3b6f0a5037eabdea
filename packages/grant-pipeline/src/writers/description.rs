//! Consolidated opportunity description.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::prompts::{format_description_prompt, DESCRIPTION_SYSTEM};
use crate::traits::ai::{CompletionRequest, LanguageModel};
use crate::types::{
    grant::{Grant, NOT_SPECIFIED},
    organization::Organization,
    report::{ConsolidatedDescription, CONSOLIDATED_TITLE},
};

const DESCRIPTION_TEMPERATURE: f32 = 0.1;

const EXPIRED_MARKERS: &[&str] = &["closed", "expired", "past", "deadline passed"];

/// Text heuristic over a free-form deadline. Unknown deadlines count as open.
pub fn is_deadline_expired(deadline: &str) -> bool {
    let deadline = deadline.trim().to_lowercase();
    if deadline.is_empty() || deadline == "not specified" || deadline == "n/a" {
        return false;
    }
    EXPIRED_MARKERS.iter().any(|marker| deadline.contains(marker))
}

/// Grants whose deadline does not read as expired, in input order.
pub fn filter_active_grants(grants: &[Grant]) -> Vec<Grant> {
    grants
        .iter()
        .filter(|grant| {
            let expired = is_deadline_expired(&grant.proposal_deadline);
            if expired {
                info!(
                    grant = %grant.grant_name,
                    deadline = %grant.proposal_deadline,
                    "Filtering out expired grant"
                );
            }
            !expired
        })
        .cloned()
        .collect()
}

/// Writes one description covering all active grants of a foundation.
pub struct DescriptionWriter {
    model: Arc<dyn LanguageModel>,
}

impl DescriptionWriter {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// One model call over every grant, with optional organization context.
    pub async fn generate_description(
        &self,
        grants: &[Grant],
        org: Option<&Organization>,
    ) -> Result<String> {
        info!(
            grants = grants.len(),
            with_org = org.is_some(),
            "Generating consolidated description"
        );

        let request = CompletionRequest::new(DESCRIPTION_SYSTEM, format_description_prompt(grants, org))
            .with_temperature(DESCRIPTION_TEMPERATURE);
        let description = self.model.complete(request).await?;

        if description.trim().is_empty() {
            return Err(PipelineError::invalid_output("empty description"));
        }
        Ok(description)
    }

    /// Filter expired grants, then describe the rest.
    ///
    /// Returns [`ConsolidatedDescription::no_active_grants`] without calling
    /// the model when nothing is left.
    pub async fn process_grants_consolidated(
        &self,
        grants: &[Grant],
        org: Option<&Organization>,
    ) -> Result<ConsolidatedDescription> {
        let active = filter_active_grants(grants);
        if active.is_empty() {
            warn!(total = grants.len(), "No active grants to describe");
            return Ok(ConsolidatedDescription::no_active_grants(org.cloned()));
        }

        let description = self.generate_description(&active, org).await?;

        Ok(ConsolidatedDescription {
            title: CONSOLIDATED_TITLE.to_string(),
            description,
            grant_count: active.len(),
            grant_names: active.iter().map(|g| g.grant_name.clone()).collect(),
            source_urls: active
                .iter()
                .map(|g| g.grant_url.trim())
                .filter(|url| !url.is_empty() && *url != NOT_SPECIFIED)
                .map(str::to_string)
                .collect(),
            org_data: org.cloned(),
        })
    }
}
