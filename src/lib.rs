//! VC Dashboard Search - directory search over venture-capital firms and startup companies.
//!
//! Firms and companies are loaded from the dashboard's REST API and/or CSV
//! exports, indexed in memory, and queried with exact, prefix and substring
//! matching. The search is exposed to AI assistants as MCP tools.
//!
//! # Architecture
//!
//! - **models**: Firm and company records, and the entities derived from them
//! - **search**: The inverted search index and term generation
//! - **repositories**: Data sources (REST API, CSV)
//! - **client**: HTTP client for the dashboard API
//! - **tools**: Index ownership and refresh coordination
//! - **services**: Request validation and result shaping
//! - **server**: MCP protocol server
//! - **cache**, **metrics**, **config**, **error**: Supporting infrastructure

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod tools;

pub use cache::TimedCache;
pub use client::DirectoryClient;
pub use config::Config;
pub use error::{ConfigError, DirectoryError, SearchError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Company, EntityKind, EntityRecord, Firm, IndexedEntity};
pub use search::{SearchHit, SearchIndex};
pub use server::DirectoryMcpServer;
pub use services::{DirectoryService, DirectoryServiceImpl};
pub use tools::DirectorySearchTools;
