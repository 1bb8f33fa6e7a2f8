use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vc_dashboard_search::error::{DirectoryError, DirectoryResult};
use vc_dashboard_search::models::Company;
use vc_dashboard_search::repositories::CompanyRepository;

/// Mock company repository for testing.
///
/// Holds companies in insertion order, counts calls, and can be switched into a
/// failing mode to simulate an unavailable source.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockCompanyRepository {
    companies: Arc<Mutex<Vec<Company>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockCompanyRepository {
    pub fn new() -> Self {
        Self {
            companies: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_companies(companies: Vec<Company>) -> Self {
        let repo = Self::new();
        repo.set_companies(companies);
        repo
    }

    pub fn add_company(&self, company: Company) {
        self.companies.lock().unwrap().push(company);
    }

    /// Replace every company in the repository.
    pub fn set_companies(&self, companies: Vec<Company>) {
        *self.companies.lock().unwrap() = companies;
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

impl Default for MockCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyRepository for MockCompanyRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        self.track_call("list");

        if *self.failing.lock().unwrap() {
            return Err(DirectoryError::HttpError("Connection failed".to_string()));
        }

        let companies = self.companies.lock().unwrap();
        Ok(companies.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        "mock:companies".to_string()
    }
}
