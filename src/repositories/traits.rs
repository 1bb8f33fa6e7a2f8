use crate::error::DirectoryResult;
use crate::models::{Company, Firm};
use async_trait::async_trait;

/// Source of venture-capital firm records.
///
/// Provides abstraction over where firms come from, enabling different
/// implementations (REST API, CSV file, mock).
#[async_trait]
pub trait FirmRepository: Send + Sync {
    /// Retrieve one page of firms.
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>>;

    /// Human-readable name of the source, for logs.
    fn source_name(&self) -> String;
}

/// Source of startup company records.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Retrieve one page of companies.
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>>;

    /// Human-readable name of the source, for logs.
    fn source_name(&self) -> String;
}
