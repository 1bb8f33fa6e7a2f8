//! Directory service layer.
//!
//! Validates requests and shapes search results for the MCP handlers.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::EntityKind;
use crate::search::SearchHit;
use crate::tools::{DirectorySearchTools, IndexStatus, RefreshOutcome};
use async_trait::async_trait;
use serde::Serialize;

/// Longest accepted query, in characters.
pub const MAX_QUERY_LENGTH: usize = 500;

/// How the results were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Ranked query results
    Search,
    /// Unranked listing in source order
    Browse,
}

/// One search result as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub kind: EntityKind,
    pub score: Option<i32>,
    /// The original firm or company record
    pub record: serde_json::Value,
}

impl DirectoryEntry {
    fn from_hit(hit: &SearchHit) -> DirectoryResult<Self> {
        let entity = &hit.entity;
        Ok(Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            city: entity.city.clone(),
            state: entity.state.clone(),
            kind: entity.kind,
            score: hit.score,
            record: entity.source_ref.to_json()?,
        })
    }
}

/// Response from a directory search.
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySearchResponse {
    pub query: String,
    pub mode: SearchMode,
    pub result_count: usize,
    pub results: Vec<DirectoryEntry>,
}

/// Directory service trait for business operations.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Search firms and companies.
    ///
    /// A missing or blank query lists entities in source order. `kind`
    /// restricts both ranked and listed results to firms or companies.
    async fn search(
        &self,
        query: Option<String>,
        limit: Option<usize>,
        kind: Option<EntityKind>,
    ) -> DirectoryResult<DirectorySearchResponse>;

    /// Reload the data sources, rebuilding the index when data changed.
    async fn refresh(&self, force: bool) -> DirectoryResult<RefreshOutcome>;

    /// Current index status.
    async fn status(&self) -> IndexStatus;

    /// Drop the fetched data so the next search reloads it.
    async fn invalidate_cache(&self);
}

/// Default implementation of DirectoryService.
pub struct DirectoryServiceImpl {
    tools: DirectorySearchTools,
    default_limit: usize,
    max_limit: usize,
}

impl DirectoryServiceImpl {
    /// Create a new directory service.
    pub fn new(tools: DirectorySearchTools, default_limit: usize, max_limit: usize) -> Self {
        Self {
            tools,
            default_limit,
            max_limit,
        }
    }

    /// Validate search query.
    fn validate_search_query(query: &str) -> Result<(), String> {
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(format!(
                "Search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            ));
        }
        Ok(())
    }

    /// Apply the default limit and clamp to the maximum.
    fn effective_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

#[async_trait]
impl DirectoryService for DirectoryServiceImpl {
    async fn search(
        &self,
        query: Option<String>,
        limit: Option<usize>,
        kind: Option<EntityKind>,
    ) -> DirectoryResult<DirectorySearchResponse> {
        let query = query.unwrap_or_default();
        Self::validate_search_query(&query).map_err(DirectoryError::InvalidRequest)?;

        let limit = self.effective_limit(limit);

        let hits = self.tools.search_kind(&query, limit, kind).await;

        let mode = if query.trim().is_empty() || hits.iter().any(|hit| hit.score.is_none()) {
            SearchMode::Browse
        } else {
            SearchMode::Search
        };

        let results = hits
            .iter()
            .map(DirectoryEntry::from_hit)
            .collect::<DirectoryResult<Vec<_>>>()?;

        tracing::debug!("Search '{}' returned {} results", query, results.len());

        Ok(DirectorySearchResponse {
            query,
            mode,
            result_count: results.len(),
            results,
        })
    }

    async fn refresh(&self, force: bool) -> DirectoryResult<RefreshOutcome> {
        self.tools.refresh(force).await
    }

    async fn status(&self) -> IndexStatus {
        self.tools.status().await
    }

    async fn invalidate_cache(&self) {
        self.tools.invalidate_cache().await
    }
}
