//! In-memory repository doubles for integration tests.

mod mock_company_repository;
mod mock_firm_repository;

pub use mock_company_repository::MockCompanyRepository;
pub use mock_firm_repository::MockFirmRepository;
