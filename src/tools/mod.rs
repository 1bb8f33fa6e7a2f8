//! Tools over the firm and company directory.
//!
//! `DirectorySearchTools` owns the search index and keeps it in step with
//! the configured data sources.

pub mod directory;

pub use directory::{DirectorySearchTools, IndexStatus, RefreshOutcome, DEFAULT_RETRY_BACKOFF};
