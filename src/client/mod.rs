//! HTTP client for the dashboard's directory REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, error mapping,
//! and response unwrapping for the paginated firm and company endpoints.

mod async_wrapper;
pub use async_wrapper::{AsyncDirectoryClient, AsyncDirectoryClientImpl};

use crate::config::Config;
use crate::error::{ConfigError, ConfigResult, DirectoryError, DirectoryResult};
use crate::metrics::Metrics;
use crate::models::{Company, Firm};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Pagination metadata returned alongside a page of records.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PaginationInfo {
    /// Total number of records across all pages
    pub total: usize,

    /// Offset of this page
    pub offset: usize,

    /// Requested page size
    pub limit: usize,
}

/// HTTP client for the dashboard directory API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct DirectoryClient {
    /// Base URL for the API
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl DirectoryClient {
    /// Create a new client.
    pub fn new(base_url: String, api_key: String, timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a client from configuration.
    ///
    /// Fails when no API base URL is configured.
    pub fn from_config(config: &Config, metrics: Metrics) -> ConfigResult<Self> {
        let base_url = config
            .directory_api_url
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("DIRECTORY_API_BASE_URL".to_string()))?;
        let api_key = config
            .directory_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("DIRECTORY_API_KEY".to_string()))?;

        Ok(Self::new(
            base_url,
            api_key,
            Duration::from_secs(config.request_timeout),
            metrics,
        ))
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request with authentication and return the body.
    fn get(&self, path: &str) -> DirectoryResult<String> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set(API_KEY_HEADER, &self.api_key)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        self.metrics.record_http_request(duration);

        match result {
            Ok(response) => response
                .into_string()
                .map_err(|e| DirectoryError::HttpError(e.to_string())),
            Err(e) => {
                tracing::warn!("GET {} failed: {}", url, e);
                self.metrics.record_http_error();
                Err(e)
            }
        }
    }

    /// Map a ureq error to a DirectoryError.
    fn map_error(&self, error: ureq::Error) -> DirectoryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => DirectoryError::Unauthorized,
                    404 => DirectoryError::NotFound(message),
                    429 => DirectoryError::RateLimitExceeded,
                    _ => DirectoryError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    DirectoryError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io => DirectoryError::Timeout,
                _ => DirectoryError::HttpError(transport.to_string()),
            },
        }
    }

    /// Get one page of firms.
    pub fn get_firms(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        let path = format!("/firms?limit={}&offset={}", limit, offset);
        let body = self.get(&path)?;
        parse_page(&body, "firms")
    }

    /// Get one page of companies.
    pub fn get_companies(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        let path = format!("/companies?limit={}&offset={}", limit, offset);
        let body = self.get(&path)?;
        parse_page(&body, "companies")
    }
}

/// Parse a page body that is either `{"<key>": [...], "pagination": {...}}`
/// or a bare JSON array.
fn parse_page<T: DeserializeOwned>(body: &str, key: &str) -> DirectoryResult<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(mut map) => {
            if let Some(pagination) = map.remove("pagination") {
                if let Ok(info) = serde_json::from_value::<PaginationInfo>(pagination) {
                    tracing::trace!(
                        "Page at offset {} of {} total {}",
                        info.offset,
                        info.total,
                        key
                    );
                }
            }

            let records = map.remove(key).ok_or_else(|| {
                DirectoryError::Other(format!("Missing '{}' in API response", key))
            })?;
            Ok(serde_json::from_value(records)?)
        }
        _ => Err(DirectoryError::Other(format!(
            "Unexpected response shape for '{}'",
            key
        ))),
    }
}
