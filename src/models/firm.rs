//! Firm model representing a venture-capital firm.

use super::entity::deserialize_optional_id;
use serde::{Deserialize, Serialize};

/// A venture-capital firm as delivered by the dashboard's data sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct Firm {
    /// Source-assigned identifier
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<String>,

    /// Firm name
    pub name: String,

    /// Headquarters city
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Headquarters state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Website URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preferred investment stage (e.g. "Seed", "Series A")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_focus: Option<String>,

    /// Sectors the firm invests in
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,
}

impl Firm {
    /// Create a firm with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the provided identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set city and state.
    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }
}
