//! Configuration management for the directory search server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured if present, without printing anything to stdout
//! (which MCP uses for communication).

use crate::error::{ConfigError, ConfigResult};
use crate::search::DEFAULT_SEARCH_LIMIT;
use std::env;
use std::path::PathBuf;

/// Configuration for the directory search server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dashboard REST API base URL (optional when CSV sources are configured)
    pub directory_api_url: Option<String>,

    /// API key for the dashboard REST API
    pub directory_api_key: Option<String>,

    /// CSV file with additional firm rows
    pub firms_csv_path: Option<PathBuf>,

    /// CSV file with additional company rows
    pub companies_csv_path: Option<PathBuf>,

    /// How long loaded collections are trusted before re-fetching (default: 30)
    pub index_refresh_ttl_minutes: u64,

    /// Seconds searches wait before retrying a failed reload (default: 30)
    pub refresh_retry_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Result count when a caller does not pass a limit (default: 20)
    pub default_search_limit: usize,

    /// Upper bound on any requested limit (default: 100)
    pub max_search_limit: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Sources (at least one required):
    /// - `DIRECTORY_API_BASE_URL` + `DIRECTORY_API_KEY`: dashboard REST API
    /// - `FIRMS_CSV_PATH`: CSV file of firms
    /// - `COMPANIES_CSV_PATH`: CSV file of companies
    ///
    /// Optional environment variables:
    /// - `INDEX_REFRESH_TTL_MINUTES`: Data refresh interval (default: 30)
    /// - `INDEX_REFRESH_RETRY_SECS`: Backoff after a failed reload (default: 30)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `DEFAULT_SEARCH_LIMIT`: Default result count (default: 20)
    /// - `MAX_SEARCH_LIMIT`: Maximum result count (default: 100)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let directory_api_url = Self::optional_var("DIRECTORY_API_BASE_URL");
        let directory_api_key = Self::optional_var("DIRECTORY_API_KEY");

        if let Some(ref url) = directory_api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "DIRECTORY_API_BASE_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }

            if directory_api_key.is_none() {
                return Err(ConfigError::MissingVar("DIRECTORY_API_KEY".to_string()));
            }
        }

        let firms_csv_path = Self::optional_var("FIRMS_CSV_PATH").map(PathBuf::from);
        let companies_csv_path = Self::optional_var("COMPANIES_CSV_PATH").map(PathBuf::from);

        if directory_api_url.is_none() && firms_csv_path.is_none() && companies_csv_path.is_none()
        {
            return Err(ConfigError::MissingVar(
                "DIRECTORY_API_BASE_URL, FIRMS_CSV_PATH or COMPANIES_CSV_PATH".to_string(),
            ));
        }

        let index_refresh_ttl_minutes = Self::parse_env_u64("INDEX_REFRESH_TTL_MINUTES", 30)?;
        let refresh_retry_secs = Self::parse_env_u64("INDEX_REFRESH_RETRY_SECS", 30)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let default_search_limit =
            Self::parse_env_usize("DEFAULT_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?;
        let max_search_limit = Self::parse_env_usize("MAX_SEARCH_LIMIT", 100)?;

        if max_search_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_SEARCH_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if default_search_limit > max_search_limit {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_SEARCH_LIMIT".to_string(),
                reason: format!("Must not exceed MAX_SEARCH_LIMIT ({})", max_search_limit),
            });
        }

        let log_level = Self::optional_var("LOG_LEVEL").unwrap_or_else(|| "error".to_string());

        Ok(Config {
            directory_api_url,
            directory_api_key,
            firms_csv_path,
            companies_csv_path,
            index_refresh_ttl_minutes,
            refresh_retry_secs,
            request_timeout,
            default_search_limit,
            max_search_limit,
            log_level,
        })
    }

    /// Refresh TTL converted to seconds.
    pub fn index_refresh_ttl_secs(&self) -> u64 {
        self.index_refresh_ttl_minutes * 60
    }

    /// Read a variable, treating blank values as unset.
    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse an environment variable as u64, using the default when unset or blank.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match Self::optional_var(var_name) {
            Some(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            None => Ok(default),
        }
    }

    /// Parse an environment variable as usize, using the default when unset or blank.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match Self::optional_var(var_name) {
            Some(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            None => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            directory_api_url: None,
            directory_api_key: None,
            firms_csv_path: None,
            companies_csv_path: None,
            index_refresh_ttl_minutes: 30,
            refresh_retry_secs: 30,
            request_timeout: 10,
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            max_search_limit: 100,
            log_level: "error".to_string(),
        }
    }
}
