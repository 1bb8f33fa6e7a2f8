//! Directory search tools with a refreshable index.
//!
//! Owns the firm/company search index, loads the collections from every
//! configured source and rebuilds the index only when the data changed.

use crate::cache::TimedCache;
use crate::error::{DirectoryResult, SearchError};
use crate::metrics::Metrics;
use crate::models::{Company, EntityKind, Firm};
use crate::repositories::{
    fetch_all_companies, fetch_all_firms, CompanyRepository, FirmRepository,
};
use crate::search::{SearchHit, SearchIndex};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

const FINGERPRINT_KEY: &str = "directory";

/// Minimum wait before a search retries a reload that failed.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Result of a refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    /// Whether a new index was built and swapped in
    pub rebuilt: bool,

    /// Entities in the current index
    pub entity_count: usize,

    /// Distinct terms in the current index
    pub term_count: usize,
}

/// Snapshot of the index state.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStatus {
    pub built: bool,
    pub entity_count: usize,
    pub firm_count: usize,
    pub company_count: usize,
    pub term_count: usize,
    /// RFC 3339 time of the last completed build
    pub last_built_at: Option<String>,
    pub builds_performed: u64,
    /// Seconds since the collections were last fetched
    pub data_age_secs: Option<u64>,
    pub refresh_ttl_secs: u64,
    pub sources: Vec<String>,
    /// Error from the most recent reload, cleared by the next success
    pub last_refresh_error: Option<String>,
}

/// Search tools over the firm and company directory.
#[derive(Clone)]
pub struct DirectorySearchTools {
    firm_repos: Vec<Arc<dyn FirmRepository>>,
    company_repos: Vec<Arc<dyn CompanyRepository>>,
    index: Arc<RwLock<SearchIndex>>,
    /// Fingerprint of the collections behind the current index
    fingerprints: TimedCache<String, u64>,
    /// Last reload error, held for the retry backoff
    failures: TimedCache<String, String>,
    refresh_lock: Arc<Mutex<()>>,
    last_built_at: Arc<RwLock<Option<DateTime<Utc>>>>,
    metrics: Metrics,
}

impl DirectorySearchTools {
    /// Create new directory search tools.
    ///
    /// # Arguments
    /// * `firm_repos` - Firm sources, concatenated in order
    /// * `company_repos` - Company sources in priority order; the first source
    ///   wins when two sources carry the same company
    /// * `refresh_ttl_secs` - How long fetched collections stay current
    /// * `metrics` - Shared metrics collector
    pub fn new(
        firm_repos: Vec<Arc<dyn FirmRepository>>,
        company_repos: Vec<Arc<dyn CompanyRepository>>,
        refresh_ttl_secs: u64,
        metrics: Metrics,
    ) -> Self {
        Self {
            firm_repos,
            company_repos,
            index: Arc::new(RwLock::new(SearchIndex::new())),
            fingerprints: TimedCache::new(refresh_ttl_secs),
            failures: TimedCache::with_ttl(DEFAULT_RETRY_BACKOFF),
            refresh_lock: Arc::new(Mutex::new(())),
            last_built_at: Arc::new(RwLock::new(None)),
            metrics,
        }
    }

    /// Set how long searches wait before retrying a failed reload.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.failures = TimedCache::with_ttl(backoff);
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Reload all sources and rebuild the index if the data changed.
    ///
    /// With `force` the index is rebuilt even when the data is unchanged.
    /// Only one refresh runs at a time; concurrent callers wait their turn.
    pub async fn refresh(&self, force: bool) -> DirectoryResult<RefreshOutcome> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked(force).await
    }

    /// Search the directory.
    ///
    /// Reloads the sources first when the fetched data has expired. A failed
    /// reload is logged and the current index is searched as-is; searches
    /// then skip reloading until the retry backoff has passed.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.search_kind(query, limit, None).await
    }

    /// Search the directory for firms or companies only.
    pub async fn search_kind(
        &self,
        query: &str,
        limit: usize,
        kind: Option<EntityKind>,
    ) -> Vec<SearchHit> {
        if let Err(e) = self.refresh_if_stale().await {
            tracing::warn!("Directory refresh failed, serving previous index: {}", e);
        }

        self.metrics.record_search();
        let index = self.index.read().await;
        index.search_kind(query, limit, kind)
    }

    /// Current index status.
    pub async fn status(&self) -> IndexStatus {
        let index = self.index.read().await;
        let last_built_at = self.last_built_at.read().await.map(|t| t.to_rfc3339());

        IndexStatus {
            built: index.is_built(),
            entity_count: index.len(),
            firm_count: index.count_kind(EntityKind::Firm),
            company_count: index.count_kind(EntityKind::Company),
            term_count: index.term_count(),
            last_built_at,
            builds_performed: self.metrics.index_builds_total(),
            data_age_secs: self
                .fingerprints
                .age(&FINGERPRINT_KEY.to_string())
                .map(|age| age.as_secs()),
            refresh_ttl_secs: self.fingerprints.ttl().as_secs(),
            sources: self.source_names(),
            last_refresh_error: self.failures.get_stale(&FINGERPRINT_KEY.to_string()),
        }
    }

    /// Invalidate the fetched data.
    ///
    /// The next search reloads every source and rebuilds the index.
    pub async fn invalidate_cache(&self) {
        let key = FINGERPRINT_KEY.to_string();
        self.fingerprints.remove(&key);
        self.failures.remove(&key);
        tracing::debug!("Directory data invalidated");
    }

    fn source_names(&self) -> Vec<String> {
        self.firm_repos
            .iter()
            .map(|repo| repo.source_name())
            .chain(self.company_repos.iter().map(|repo| repo.source_name()))
            .collect()
    }

    /// Whether a search may skip reloading: the data is current, or the last
    /// reload failed within the retry backoff.
    fn can_skip_reload(&self) -> bool {
        let key = FINGERPRINT_KEY.to_string();
        self.fingerprints.get(&key).is_some() || self.failures.get(&key).is_some()
    }

    async fn refresh_if_stale(&self) -> DirectoryResult<()> {
        if self.can_skip_reload() {
            return Ok(());
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed, or failed to, while we waited.
        if self.can_skip_reload() {
            return Ok(());
        }

        match self.refresh_locked(false).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.failures
                    .insert(FINGERPRINT_KEY.to_string(), e.to_string());
                Err(e)
            }
        }
    }

    async fn refresh_locked(&self, force: bool) -> DirectoryResult<RefreshOutcome> {
        let (firms, companies) = tokio::try_join!(self.load_firms(), self.load_companies())?;
        let fingerprint = fingerprint(&firms, &companies);
        let key = FINGERPRINT_KEY.to_string();

        let unchanged = self.fingerprints.get_stale(&key) == Some(fingerprint)
            && self.index.read().await.is_built();

        self.failures.remove(&key);

        if unchanged && !force {
            self.fingerprints.insert(key, fingerprint);
            tracing::debug!("Directory data unchanged, keeping current index");

            let index = self.index.read().await;
            return Ok(RefreshOutcome {
                rebuilt: false,
                entity_count: index.len(),
                term_count: index.term_count(),
            });
        }

        tracing::info!(
            "Building directory index from {} firms and {} companies",
            firms.len(),
            companies.len()
        );
        let start = Instant::now();

        let fresh = tokio::task::spawn_blocking(move || {
            let mut index = SearchIndex::new();
            index.build(&firms, &companies);
            index
        })
        .await
        .map_err(|e| SearchError::BuildFailed(e.to_string()))?;

        let duration = start.elapsed();
        let outcome = RefreshOutcome {
            rebuilt: true,
            entity_count: fresh.len(),
            term_count: fresh.term_count(),
        };

        *self.index.write().await = fresh;
        *self.last_built_at.write().await = Some(Utc::now());
        self.fingerprints.insert(key, fingerprint);
        self.metrics.record_index_build(duration);

        tracing::info!(
            "Directory index built in {}ms ({} entities, {} terms)",
            duration.as_millis(),
            outcome.entity_count,
            outcome.term_count
        );

        Ok(outcome)
    }

    async fn load_firms(&self) -> DirectoryResult<Vec<Firm>> {
        let pages =
            try_join_all(self.firm_repos.iter().map(|repo| fetch_all_firms(repo.as_ref()))).await?;
        let firms: Vec<Firm> = pages.into_iter().flatten().collect();

        self.metrics.record_firms_loaded(firms.len());
        Ok(firms)
    }

    async fn load_companies(&self) -> DirectoryResult<Vec<Company>> {
        let pages = try_join_all(
            self.company_repos
                .iter()
                .map(|repo| fetch_all_companies(repo.as_ref())),
        )
        .await?;
        let companies: Vec<Company> = pages.into_iter().flatten().collect();

        self.metrics.record_companies_loaded(companies.len());
        Ok(companies)
    }
}

fn fingerprint(firms: &[Firm], companies: &[Company]) -> u64 {
    let mut hasher = DefaultHasher::new();
    firms.hash(&mut hasher);
    companies.hash(&mut hasher);
    hasher.finish()
}
