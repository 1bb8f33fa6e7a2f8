//! Directory search over firms and companies.
//!
//! This module provides the in-memory inverted index and the term generation
//! it is built from.

pub mod search_index;
pub mod terms;

pub use search_index::{SearchHit, SearchIndex, DEFAULT_SEARCH_LIMIT};
pub use terms::generate_search_terms;
