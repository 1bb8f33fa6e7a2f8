//! Firm and company repositories backed by local CSV exports.

use crate::error::DirectoryResult;
use crate::models::{Company, Firm};
use crate::repositories::csv_source::{CsvRow, CsvSource, FromCsvRow};
use crate::repositories::traits::{CompanyRepository, FirmRepository};
use async_trait::async_trait;
use std::path::PathBuf;

impl FromCsvRow for Firm {
    fn from_csv_row(row: &CsvRow<'_>) -> Self {
        Self {
            id: row.get(&["id", "firm_id"]),
            name: row
                .get(&["name", "firm_name", "firm"])
                .unwrap_or_default(),
            city: row.get(&["city", "hq_city"]),
            state: row.get(&["state", "hq_state"]),
            website: row.get(&["website", "url"]),
            description: row.get(&["description"]),
            stage_focus: row.get(&["stage_focus", "stage"]),
            sectors: row.get_list(&["sectors", "sector"]),
        }
    }
}

impl FromCsvRow for Company {
    fn from_csv_row(row: &CsvRow<'_>) -> Self {
        Self {
            id: row.get(&["id", "company_id"]),
            name: row
                .get(&["name", "company_name", "company"])
                .unwrap_or_default(),
            domain: row.get(&["domain"]),
            website: row.get(&["website", "url"]),
            city: row.get(&["city", "hq_city"]),
            state: row.get(&["state", "hq_state"]),
            sector: row.get(&["sector", "industry"]),
            stage: row.get(&["stage"]),
            description: row.get(&["description"]),
        }
    }
}

/// Firm repository reading a headered CSV file.
pub struct CsvFirmRepository {
    source: CsvSource<Firm>,
}

impl CsvFirmRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CsvSource::new(path),
        }
    }
}

#[async_trait]
impl FirmRepository for CsvFirmRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        let rows = self.source.rows().await?;
        Ok(rows.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        format!("csv:{}", self.source.path().display())
    }
}

/// Company repository reading a headered CSV file.
pub struct CsvCompanyRepository {
    source: CsvSource<Company>,
}

impl CsvCompanyRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CsvSource::new(path),
        }
    }
}

#[async_trait]
impl CompanyRepository for CsvCompanyRepository {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        let rows = self.source.rows().await?;
        Ok(rows.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        format!("csv:{}", self.source.path().display())
    }
}
