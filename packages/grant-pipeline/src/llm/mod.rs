//! Handling of raw model replies.

pub mod json;

pub use json::{is_empty_reply, parse_model_json, strip_code_fences, ModelJsonError};
