//! Fetched page types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw result of a successful (200 OK) fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    pub status: u16,

    pub html: String,

    pub content_type: Option<String>,

    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            status: 200,
            html: html.into(),
            content_type: Some("text/html".to_string()),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = url.into();
        self
    }
}
