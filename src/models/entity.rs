//! Derived entity types shared by the search index and its callers.

use super::{Company, Firm};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Shared reference to an indexed entity.
///
/// Search results hand out clones of this pointer so repeated queries never
/// copy term sets or source records.
pub type IndexedEntityRef = Arc<IndexedEntity>;

/// Which collection an entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Venture-capital firm
    Firm,
    /// Startup company
    Company,
}

impl EntityKind {
    /// Get display name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Firm => "firm",
            Self::Company => "company",
        }
    }
}

/// The original record an indexed entity was derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Firm(Arc<Firm>),
    Company(Arc<Company>),
}

impl EntityRecord {
    /// Kind of the wrapped record.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Firm(_) => EntityKind::Firm,
            Self::Company(_) => EntityKind::Company,
        }
    }

    /// Display name of the wrapped record.
    pub fn name(&self) -> &str {
        match self {
            Self::Firm(firm) => &firm.name,
            Self::Company(company) => &company.name,
        }
    }

    /// Serialize the wrapped record for hydration by callers.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Firm(firm) => serde_json::to_value(firm.as_ref()),
            Self::Company(company) => serde_json::to_value(company.as_ref()),
        }
    }
}

/// An entity registered in the search index.
#[derive(Debug, Clone)]
pub struct IndexedEntity {
    /// Stable identifier (firm id, company domain/website, or generated)
    pub id: String,

    /// Display name
    pub name: String,

    /// City, empty when unknown
    pub city: String,

    /// State, empty when unknown
    pub state: String,

    /// Source collection
    pub kind: EntityKind,

    /// Lower-cased terms this entity is reachable under
    pub search_terms: BTreeSet<String>,

    /// Original record
    pub source_ref: EntityRecord,
}

/// Return the trimmed value if it is present and not blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Accept ids sent either as strings or as integers (SQL primary keys).
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
