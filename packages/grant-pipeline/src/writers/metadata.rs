//! SEO metadata for the directory listing.

use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::llm::parse_model_json;
use crate::prompts::{format_metadata_prompt, METADATA_SYSTEM};
use crate::traits::ai::{CompletionRequest, LanguageModel};
use crate::types::metadata::GrantMetadata;

const METADATA_TEMPERATURE: f32 = 0.3;

pub struct MetadataWriter {
    model: Arc<dyn LanguageModel>,
}

impl MetadataWriter {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Six fields from a consolidated description. A reply missing any of
    /// them is an error.
    pub async fn generate(&self, description: &str) -> Result<GrantMetadata> {
        info!(description_len = description.len(), "Generating grant metadata");

        let request = CompletionRequest::new(METADATA_SYSTEM, format_metadata_prompt(description))
            .with_temperature(METADATA_TEMPERATURE);
        let reply = self.model.complete(request).await?;

        let metadata = parse_model_json::<GrantMetadata>(&reply)?;
        info!(title = %metadata.opportunity_title, "Metadata generated");
        Ok(metadata)
    }
}
