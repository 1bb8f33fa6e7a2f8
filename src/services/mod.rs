//! Application service layer.
//!
//! Services validate requests and sit between the MCP handlers and the
//! directory search tools.

mod directory_service;

pub use directory_service::{
    DirectoryEntry, DirectorySearchResponse, DirectoryService, DirectoryServiceImpl, SearchMode,
    MAX_QUERY_LENGTH,
};
