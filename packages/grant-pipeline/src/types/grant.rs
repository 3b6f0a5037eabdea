//! The per-page grant record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient;

/// Placeholder every text field starts out as.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One grant opportunity extracted from a single page.
///
/// Built once from model output, stamped with the page URL, and never
/// modified afterwards. Missing keys and `null` values fall back to
/// [`NOT_SPECIFIED`]; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub grant_name: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub funding_priorities: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub types_of_grant: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub eligibility_criteria: String,

    /// Nonprofits, individuals, small businesses, ...
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub eligible_applicants: Vec<String>,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub eligible_locations: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub grant_amount_range: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub grant_amount: String,

    /// Free text. Never parsed as a date.
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub proposal_deadline: String,

    /// Annual, rolling, one-time, ...
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub recurrence: String,

    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub contact_info: ContactInfo,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub organization_info: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub grant_summary: String,

    /// Page the grant was extracted from.
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub grant_url: String,
}

impl Default for Grant {
    fn default() -> Self {
        Self {
            grant_name: NOT_SPECIFIED.to_string(),
            funding_priorities: NOT_SPECIFIED.to_string(),
            types_of_grant: NOT_SPECIFIED.to_string(),
            eligibility_criteria: NOT_SPECIFIED.to_string(),
            eligible_applicants: Vec::new(),
            eligible_locations: NOT_SPECIFIED.to_string(),
            grant_amount_range: NOT_SPECIFIED.to_string(),
            grant_amount: NOT_SPECIFIED.to_string(),
            proposal_deadline: NOT_SPECIFIED.to_string(),
            recurrence: NOT_SPECIFIED.to_string(),
            contact_info: ContactInfo::default(),
            organization_info: NOT_SPECIFIED.to_string(),
            grant_summary: NOT_SPECIFIED.to_string(),
            grant_url: NOT_SPECIFIED.to_string(),
        }
    }
}

impl Grant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            grant_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.proposal_deadline = deadline.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.grant_url = url.into();
        self
    }

    /// A record only counts as a grant when the model actually named one.
    pub fn has_name(&self) -> bool {
        let name = self.grant_name.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case(NOT_SPECIFIED)
    }

    /// The only deadline rule applied at collection time: a deadline that
    /// mentions "closed" (any case) drops the grant.
    pub fn is_closed(&self) -> bool {
        self.proposal_deadline.to_lowercase().contains("closed")
    }
}

/// Contact block of a grant. Keys beyond email/phone/address are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub email: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub phone: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub address: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: NOT_SPECIFIED.to_string(),
            phone: NOT_SPECIFIED.to_string(),
            address: NOT_SPECIFIED.to_string(),
            extra: BTreeMap::new(),
        }
    }
}
