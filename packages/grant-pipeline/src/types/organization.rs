//! Foundation-level record aggregated across every fetched page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::grant::NOT_SPECIFIED;
use super::lenient;

/// Identity, mission and contact details of the grant maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub org_name: String,

    /// Mission statement and funding focus
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub mission: String,

    /// History, founding, milestones
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub background: String,

    /// Programs and initiatives
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub about: String,

    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub contact: OrganizationContact,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            org_name: NOT_SPECIFIED.to_string(),
            mission: NOT_SPECIFIED.to_string(),
            background: NOT_SPECIFIED.to_string(),
            about: NOT_SPECIFIED.to_string(),
            contact: OrganizationContact::default(),
        }
    }
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            org_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = mission.into();
        self
    }

    pub fn has_name(&self) -> bool {
        let name = self.org_name.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case(NOT_SPECIFIED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationContact {
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub phone: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub email: String,

    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::string")]
    pub address: String,

    /// Social handles, contact forms and the like. Any JSON shape.
    #[serde(
        default = "lenient::not_specified_value",
        deserialize_with = "lenient::value_or_sentinel"
    )]
    pub other_info: Value,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for OrganizationContact {
    fn default() -> Self {
        Self {
            phone: NOT_SPECIFIED.to_string(),
            email: NOT_SPECIFIED.to_string(),
            address: NOT_SPECIFIED.to_string(),
            other_info: lenient::not_specified_value(),
            extra: BTreeMap::new(),
        }
    }
}
