//! Repository layer for data access.
//!
//! Firms and companies can come from the dashboard REST API, from CSV
//! exports, or from test doubles implementing the same traits.

pub mod api_repositories;
pub mod csv_repositories;
pub mod csv_source;
pub mod paging;
pub mod traits;

pub use api_repositories::{ApiCompanyRepository, ApiFirmRepository};
pub use csv_repositories::{CsvCompanyRepository, CsvFirmRepository};
pub use csv_source::{CsvRow, CsvSource, FromCsvRow};
pub use paging::{fetch_all_companies, fetch_all_firms, PAGE_SIZE};
pub use traits::{CompanyRepository, FirmRepository};
