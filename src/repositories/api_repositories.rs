use crate::client::AsyncDirectoryClient;
use crate::error::DirectoryResult;
use crate::models::{Company, Firm};
use crate::repositories::traits::{CompanyRepository, FirmRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Firm repository backed by the dashboard REST API.
///
/// Delegates every call to the AsyncDirectoryClient.
pub struct ApiFirmRepository {
    client: Arc<dyn AsyncDirectoryClient>,
}

impl ApiFirmRepository {
    /// Create a new ApiFirmRepository with the given client.
    pub fn new(client: Arc<dyn AsyncDirectoryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FirmRepository for ApiFirmRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        self.client.get_firms(limit, offset).await
    }

    fn source_name(&self) -> String {
        "api:firms".to_string()
    }
}

/// Company repository backed by the dashboard REST API.
pub struct ApiCompanyRepository {
    client: Arc<dyn AsyncDirectoryClient>,
}

impl ApiCompanyRepository {
    /// Create a new ApiCompanyRepository with the given client.
    pub fn new(client: Arc<dyn AsyncDirectoryClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompanyRepository for ApiCompanyRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        self.client.get_companies(limit, offset).await
    }

    fn source_name(&self) -> String {
        "api:companies".to_string()
    }
}
