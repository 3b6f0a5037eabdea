//! SEO metadata for a grant detail page.

use serde::{Deserialize, Serialize};

/// All six fields are required; a reply missing any of them is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantMetadata {
    /// ~70 characters
    pub opportunity_title: String,
    /// ~70 characters
    pub h1_tag: String,
    /// ~70 characters
    pub meta_title: String,
    /// ~70 characters, distinct from `meta_title`
    pub meta_description: String,
    /// ~500 words, no icons, bullets or source names
    pub opportunity_teaser: String,
    /// ~120 characters, includes the grant name
    pub opportunity_title_for_subscriber: String,
}

impl GrantMetadata {
    pub const FIELDS: [&'static str; 6] = [
        "opportunity_title",
        "h1_tag",
        "meta_title",
        "meta_description",
        "opportunity_teaser",
        "opportunity_title_for_subscriber",
    ];
}
