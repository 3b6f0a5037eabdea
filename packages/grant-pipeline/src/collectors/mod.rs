//! Collectors turn a foundation's pages into structured records.
//!
//! Both run the same shape of loop: discover candidate links, fetch each
//! page, clean it to text, and hand the text to the model. The grant
//! collector makes one call per page; the organization collector makes a
//! single call over every page combined.

pub mod grants;
pub mod organization;

pub use grants::GrantCollector;
pub use organization::OrganizationCollector;

/// Sampling temperature for both extraction prompts.
pub const EXTRACTION_TEMPERATURE: f32 = 0.3;
