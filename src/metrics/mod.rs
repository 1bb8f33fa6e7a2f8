//! Basic metrics instrumentation for tracking performance.
//!
//! Counters for HTTP traffic to the dashboard API, records loaded from every
//! source, and index builds and queries.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector shared between the client and the search tools.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    http_requests_total: Arc<AtomicU64>,
    http_errors_total: Arc<AtomicU64>,
    http_duration_total_ms: Arc<AtomicU64>,
    firms_loaded_total: Arc<AtomicU64>,
    companies_loaded_total: Arc<AtomicU64>,
    index_builds_total: Arc<AtomicU64>,
    index_build_duration_total_ms: Arc<AtomicU64>,
    searches_total: Arc<AtomicU64>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record firms loaded from any source.
    pub fn record_firms_loaded(&self, count: usize) {
        self.firms_loaded_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record companies loaded from any source.
    pub fn record_companies_loaded(&self, count: usize) {
        self.companies_loaded_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a completed index build.
    pub fn record_index_build(&self, duration: Duration) {
        self.index_builds_total.fetch_add(1, Ordering::Relaxed);
        self.index_build_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a search query.
    pub fn record_search(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        average(
            self.http_duration_total_ms.load(Ordering::Relaxed),
            self.http_requests_total(),
        )
    }

    /// Get total firms loaded.
    pub fn firms_loaded_total(&self) -> u64 {
        self.firms_loaded_total.load(Ordering::Relaxed)
    }

    /// Get total companies loaded.
    pub fn companies_loaded_total(&self) -> u64 {
        self.companies_loaded_total.load(Ordering::Relaxed)
    }

    /// Get total index builds.
    pub fn index_builds_total(&self) -> u64 {
        self.index_builds_total.load(Ordering::Relaxed)
    }

    /// Get average index build duration in milliseconds.
    pub fn index_build_avg_ms(&self) -> f64 {
        average(
            self.index_build_duration_total_ms.load(Ordering::Relaxed),
            self.index_builds_total(),
        )
    }

    /// Get total searches.
    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            firms_loaded_total: self.firms_loaded_total(),
            companies_loaded_total: self.companies_loaded_total(),
            index_builds_total: self.index_builds_total(),
            index_build_avg_ms: self.index_build_avg_ms(),
            searches_total: self.searches_total(),
        }
    }
}

fn average(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub firms_loaded_total: u64,
    pub companies_loaded_total: u64,
    pub index_builds_total: u64,
    pub index_build_avg_ms: f64,
    pub searches_total: u64,
}
