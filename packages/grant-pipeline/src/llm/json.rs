//! JSON replies from the model.
//!
//! Prompts ask for "ONLY valid JSON", and models still wrap it in Markdown
//! fences or add a sentence before it. Everything here is about getting the
//! object out anyway, and telling "nothing there" apart from "garbage".

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::PipelineError;

#[derive(Debug, Error)]
pub enum ModelJsonError {
    /// Blank reply or a bare `{}`
    #[error("model returned an empty reply")]
    Empty,

    #[error("model reply is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl From<ModelJsonError> for PipelineError {
    fn from(err: ModelJsonError) -> Self {
        match err {
            ModelJsonError::Empty => PipelineError::invalid_output("empty reply"),
            ModelJsonError::Malformed(e) => PipelineError::JsonParse(e),
        }
    }
}

/// Remove a leading ```` ``` ```` / ```` ```json ```` fence and the closing one.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Skip the language tag, if any.
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// True for replies that carry no record at all.
pub fn is_empty_reply(raw: &str) -> bool {
    let stripped = strip_code_fences(raw);
    if stripped.is_empty() {
        return true;
    }
    let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
    compact == "{}"
}

/// Strip fences and deserialize. Falls back to the outermost `{...}` span
/// when the model put prose around the object.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, ModelJsonError> {
    if is_empty_reply(raw) {
        return Err(ModelJsonError::Empty);
    }

    let stripped = strip_code_fences(raw);
    match serde_json::from_str(stripped) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let start = stripped.find('{');
            let end = stripped.rfind('}');
            match (start, end) {
                (Some(start), Some(end)) if start < end && (start > 0 || end + 1 < stripped.len()) => {
                    serde_json::from_str(&stripped[start..=end])
                        .map_err(|_| ModelJsonError::Malformed(first_err))
                }
                _ => Err(ModelJsonError::Malformed(first_err)),
            }
        }
    }
}
