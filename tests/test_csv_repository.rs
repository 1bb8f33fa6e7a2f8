//! Tests for the CSV-backed firm and company repositories.

use std::io::Write;
use tempfile::NamedTempFile;
use vc_dashboard_search::error::DirectoryError;
use vc_dashboard_search::repositories::{
    fetch_all_companies, fetch_all_firms, CompanyRepository, CsvCompanyRepository,
    CsvFirmRepository, FirmRepository,
};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_firms_csv_parses_known_columns() {
    let file = csv_file(
        "Firm Name,City,State,Website,Stage Focus,Sectors,Partner Count\n\
         Acme Ventures,Boston,MA,https://acme.vc,Seed,fintech; health,4\n\
         Harbor Capital,,,,,,\n",
    );
    let repo = CsvFirmRepository::new(file.path());

    let firms = repo.list(10, 0).await.unwrap();

    assert_eq!(firms.len(), 2);
    assert_eq!(firms[0].name, "Acme Ventures");
    assert_eq!(firms[0].city.as_deref(), Some("Boston"));
    assert_eq!(firms[0].website.as_deref(), Some("https://acme.vc"));
    assert_eq!(firms[0].stage_focus.as_deref(), Some("Seed"));
    assert_eq!(
        firms[0].sectors,
        vec!["fintech".to_string(), "health".to_string()]
    );
    assert_eq!(firms[1].city, None);
    assert!(firms[1].id.is_none());
}

#[tokio::test]
async fn test_companies_csv_header_aliases() {
    let file = csv_file(
        "COMPANY_NAME,Domain,Industry,HQ City,HQ State\n\
         Acme Corp,acme.com,Robotics,Boston,MA\n",
    );
    let repo = CsvCompanyRepository::new(file.path());

    let companies = repo.list(10, 0).await.unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name, "Acme Corp");
    assert_eq!(companies[0].domain.as_deref(), Some("acme.com"));
    assert_eq!(companies[0].sector.as_deref(), Some("Robotics"));
    assert_eq!(companies[0].city.as_deref(), Some("Boston"));
    assert_eq!(companies[0].state.as_deref(), Some("MA"));
}

#[tokio::test]
async fn test_csv_pagination() {
    let mut contents = String::from("name\n");
    for i in 0..250 {
        contents.push_str(&format!("Firm {}\n", i));
    }
    let file = csv_file(&contents);
    let repo = CsvFirmRepository::new(file.path());

    let page = repo.list(100, 200).await.unwrap();
    assert_eq!(page.len(), 50);
    assert_eq!(page[0].name, "Firm 200");

    let all = fetch_all_firms(&repo).await.unwrap();
    assert_eq!(all.len(), 250);
    assert_eq!(all[249].name, "Firm 249");
}

#[tokio::test]
async fn test_csv_picks_up_file_changes() {
    let mut file = csv_file("name,domain\nAcme Corp,acme.com\n");
    let repo = CsvCompanyRepository::new(file.path());

    assert_eq!(fetch_all_companies(&repo).await.unwrap().len(), 1);

    file.write_all(b"Northwind Labs,northwind.io\n").unwrap();
    file.flush().unwrap();

    let companies = fetch_all_companies(&repo).await.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].name, "Northwind Labs");
}

#[tokio::test]
async fn test_missing_csv_file_is_io_error() {
    let repo = CsvFirmRepository::new("/nonexistent/firms.csv");

    let err = repo.list(10, 0).await.unwrap_err();
    assert!(matches!(err, DirectoryError::IoError(_)));
    assert_eq!(repo.source_name(), "csv:/nonexistent/firms.csv");
}
