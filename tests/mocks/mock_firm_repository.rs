use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vc_dashboard_search::error::{DirectoryError, DirectoryResult};
use vc_dashboard_search::models::Firm;
use vc_dashboard_search::repositories::FirmRepository;

/// Mock firm repository for testing.
///
/// Holds firms in insertion order, counts calls, and can be switched into a
/// failing mode to simulate an unavailable source.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockFirmRepository {
    firms: Arc<Mutex<Vec<Firm>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockFirmRepository {
    pub fn new() -> Self {
        Self {
            firms: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_firms(firms: Vec<Firm>) -> Self {
        let repo = Self::new();
        repo.set_firms(firms);
        repo
    }

    pub fn add_firm(&self, firm: Firm) {
        self.firms.lock().unwrap().push(firm);
    }

    /// Replace every firm in the repository.
    pub fn set_firms(&self, firms: Vec<Firm>) {
        *self.firms.lock().unwrap() = firms;
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockFirmRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FirmRepository for MockFirmRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        self.track_call("list");

        if *self.failing.lock().unwrap() {
            return Err(DirectoryError::HttpError("Connection failed".to_string()));
        }

        let firms = self.firms.lock().unwrap();
        Ok(firms.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        "mock:firms".to_string()
    }
}
