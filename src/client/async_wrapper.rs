//! Async wrapper around the synchronous DirectoryClient.
//!
//! HTTP calls run on tokio's blocking thread pool via
//! `tokio::task::spawn_blocking`, so they never stall the async runtime.

use crate::client::DirectoryClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Company, Firm};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to the directory API.
#[async_trait]
pub trait AsyncDirectoryClient: Send + Sync {
    async fn get_firms(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>>;
    async fn get_companies(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>>;
}

/// Async wrapper around the synchronous DirectoryClient.
#[derive(Clone)]
pub struct AsyncDirectoryClientImpl {
    client: Arc<DirectoryClient>,
}

impl AsyncDirectoryClientImpl {
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> DirectoryError {
    DirectoryError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncDirectoryClient for AsyncDirectoryClientImpl {
    async fn get_firms(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_firms(limit, offset))
            .await
            .map_err(join_error)?
    }

    async fn get_companies(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_companies(limit, offset))
            .await
            .map_err(join_error)?
    }
}
