//! Headered CSV files as a secondary directory data source.
//!
//! Header names are matched case-insensitively with spaces and dashes folded
//! to underscores, so "Company Name" and "company_name" are the same column.
//! Parsed rows are memoised until the file's modification time or size changes.

use crate::error::{DirectoryError, DirectoryResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Conversion from one CSV row into a record.
pub trait FromCsvRow: Sized {
    fn from_csv_row(row: &CsvRow<'_>) -> Self;
}

/// A CSV record together with its header lookup.
pub struct CsvRow<'a> {
    headers: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl CsvRow<'_> {
    /// First non-empty value among the given column names.
    pub fn get(&self, columns: &[&str]) -> Option<String> {
        columns.iter().find_map(|column| {
            self.headers
                .get(*column)
                .and_then(|&idx| self.record.get(idx))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    /// Value split on `;` or `,` into trimmed, non-empty parts.
    pub fn get_list(&self, columns: &[&str]) -> Vec<String> {
        self.get(columns)
            .map(|raw| {
                raw.split([';', ','])
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// File identity used to decide whether memoised rows are still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

struct CachedRows<T> {
    stamp: FileStamp,
    rows: Arc<Vec<T>>,
}

/// A CSV file parsed into records of type `T`.
pub struct CsvSource<T> {
    path: PathBuf,
    cached: Mutex<Option<CachedRows<T>>>,
}

impl<T> CsvSource<T>
where
    T: FromCsvRow + Send + Sync + 'static,
{
    /// Create a source for the file at `path`. Nothing is read until `rows`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows of the file, re-read only when the file changed.
    pub async fn rows(&self) -> DirectoryResult<Arc<Vec<T>>> {
        let path = self.path.clone();
        let stamp = tokio::task::spawn_blocking(move || file_stamp(&path))
            .await
            .map_err(|e| DirectoryError::Other(format!("Task join error: {}", e)))??;

        if let Some(rows) = self.cached_rows(stamp) {
            return Ok(rows);
        }

        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || read_csv::<T>(&path))
            .await
            .map_err(|e| DirectoryError::Other(format!("Task join error: {}", e)))??;
        let rows = Arc::new(rows);

        tracing::info!("Loaded {} rows from {}", rows.len(), self.path.display());

        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(CachedRows {
                stamp,
                rows: rows.clone(),
            });
        }

        Ok(rows)
    }

    fn cached_rows(&self, stamp: FileStamp) -> Option<Arc<Vec<T>>> {
        let cached = self.cached.lock().ok()?;
        cached
            .as_ref()
            .filter(|c| c.stamp == stamp)
            .map(|c| c.rows.clone())
    }
}

fn file_stamp(path: &Path) -> DirectoryResult<FileStamp> {
    let metadata = std::fs::metadata(path)?;
    Ok(FileStamp {
        modified: metadata.modified().ok(),
        len: metadata.len(),
    })
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Parse a headered CSV file. Rows that fail to decode are logged and skipped.
pub fn read_csv<T: FromCsvRow>(path: &Path) -> DirectoryResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(T::from_csv_row(&CsvRow {
                headers: &headers,
                record: &record,
            })),
            Err(e) => {
                tracing::warn!("Skipping row {} of {}: {}", line + 2, path.display(), e);
            }
        }
    }

    Ok(rows)
}
