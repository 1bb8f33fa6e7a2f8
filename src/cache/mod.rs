//! Caching utilities for the directory search server.
//!
//! This module provides a generic time-based cache implementation with TTL support.

pub mod timed_cache;

pub use timed_cache::TimedCache;
