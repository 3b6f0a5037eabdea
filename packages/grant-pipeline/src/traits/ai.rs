//! Language model trait.
//!
//! Every prompt in the pipeline is a single system + user exchange that
//! returns text, so the trait is one method wide. Parsing the reply is the
//! caller's job (see [`crate::llm`]).

use async_trait::async_trait;

use crate::error::Result;

/// One chat-style request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send the request and return the raw assistant text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str {
        "unknown"
    }
}
