//! Company model representing a startup.

use super::entity::{deserialize_optional_id, non_blank};
use serde::{Deserialize, Serialize};

/// A startup company as delivered by the dashboard's data sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct Company {
    /// Source-assigned identifier (often absent for CSV rows)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<String>,

    /// Company name
    pub name: String,

    /// Primary domain (e.g. "acme.com")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Website URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Headquarters city
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Headquarters state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Industry sector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// Latest funding stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Company {
    /// Create a company with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Set city and state.
    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Key used to collapse duplicate company rows: domain, else website, else name.
    ///
    /// Compared case-insensitively with surrounding whitespace ignored.
    pub fn dedup_key(&self) -> String {
        non_blank(&self.domain)
            .or_else(|| non_blank(&self.website))
            .unwrap_or_else(|| self.name.trim())
            .to_lowercase()
    }

    /// Identifier to register this company under, if it carries one.
    ///
    /// Domain wins over website, which wins over a source-assigned id.
    pub fn preferred_id(&self) -> Option<String> {
        non_blank(&self.domain)
            .or_else(|| non_blank(&self.website))
            .or_else(|| non_blank(&self.id))
            .map(str::to_string)
    }
}
