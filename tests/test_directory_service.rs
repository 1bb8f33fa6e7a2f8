//! Tests for request handling in the directory service.

mod mocks;

use mocks::{MockCompanyRepository, MockFirmRepository};
use std::sync::Arc;
use vc_dashboard_search::error::DirectoryError;
use vc_dashboard_search::models::{Company, EntityKind, Firm};
use vc_dashboard_search::repositories::{CompanyRepository, FirmRepository};
use vc_dashboard_search::services::SearchMode;
use vc_dashboard_search::{DirectorySearchTools, DirectoryService, DirectoryServiceImpl, Metrics};

fn service_with(
    firms: Vec<Firm>,
    companies: Vec<Company>,
    max_limit: usize,
) -> DirectoryServiceImpl {
    let tools = DirectorySearchTools::new(
        vec![Arc::new(MockFirmRepository::with_firms(firms)) as Arc<dyn FirmRepository>],
        vec![Arc::new(MockCompanyRepository::with_companies(companies)) as Arc<dyn CompanyRepository>],
        300,
        Metrics::new(),
    );
    DirectoryServiceImpl::new(tools, 3.min(max_limit), max_limit)
}

fn numbered_firms(count: usize) -> Vec<Firm> {
    (0..count)
        .map(|i| Firm::new(format!("Pioneer Fund {}", i)).with_id(i.to_string()))
        .collect()
}

#[tokio::test]
async fn test_default_limit_applies() {
    let service = service_with(numbered_firms(10), Vec::new(), 100);

    let response = service.search(Some("pioneer".to_string()), None, None).await.unwrap();

    assert_eq!(response.mode, SearchMode::Search);
    assert_eq!(response.result_count, 3);
    assert_eq!(response.results.len(), 3);
    assert!(response.results.iter().all(|r| r.score == Some(100)));
}

#[tokio::test]
async fn test_limit_clamped_to_maximum() {
    let service = service_with(numbered_firms(10), Vec::new(), 5);

    let response = service.search(None, Some(50), None).await.unwrap();

    assert_eq!(response.mode, SearchMode::Browse);
    assert_eq!(response.result_count, 5);
    assert_eq!(response.results[0].name, "Pioneer Fund 0");
    assert!(response.results.iter().all(|r| r.score.is_none()));
}

#[tokio::test]
async fn test_query_length_boundary() {
    let service = service_with(numbered_firms(1), Vec::new(), 100);

    let ok = service.search(Some("p".repeat(500)), None, None).await;
    assert!(ok.is_ok());

    let err = service
        .search(Some("p".repeat(501)), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_kind_filter_keeps_ranking_order() {
    let mut firms = numbered_firms(5);
    firms.push(Firm::new("Acme Ventures").with_id("acme"));
    let companies = vec![
        Company::new("Acme Corp").with_domain("acme.com"),
        Company::new("Acme Robotics").with_domain("acmerobotics.ai"),
    ];
    let service = service_with(firms, companies, 100);

    let response = service
        .search(Some("acme".to_string()), Some(1), Some(EntityKind::Company))
        .await
        .unwrap();
    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0].name, "Acme Corp");
    assert_eq!(response.results[0].kind, EntityKind::Company);

    let response = service
        .search(Some("acme".to_string()), None, Some(EntityKind::Firm))
        .await
        .unwrap();
    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0].id, "acme");
}

#[tokio::test]
async fn test_kind_filter_finds_minority_kind_beyond_max_limit() {
    let firms: Vec<Firm> = (0..150)
        .map(|i| Firm::new(format!("Fund {}", i)).with_id(i.to_string()))
        .collect();
    let companies = vec![Company::new("Zeta Labs").with_domain("zeta.io")];
    let service = service_with(firms, companies, 100);

    let response = service
        .search(None, Some(10), Some(EntityKind::Company))
        .await
        .unwrap();
    assert_eq!(response.mode, SearchMode::Browse);
    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0].name, "Zeta Labs");

    let response = service
        .search(Some("zeta".to_string()), Some(10), Some(EntityKind::Company))
        .await
        .unwrap();
    assert_eq!(response.mode, SearchMode::Search);
    assert_eq!(response.result_count, 1);

    let response = service
        .search(None, Some(10), Some(EntityKind::Firm))
        .await
        .unwrap();
    assert_eq!(response.result_count, 10);
    assert!(response.results.iter().all(|r| r.kind == EntityKind::Firm));
}

#[tokio::test]
async fn test_results_include_source_record() {
    let companies = vec![Company::new("Acme Corp")
        .with_domain("acme.com")
        .with_location("Boston", "MA")];
    let service = service_with(Vec::new(), companies, 100);

    let response = service.search(Some("boston".to_string()), None, None).await.unwrap();

    let entry = &response.results[0];
    assert_eq!(entry.id, "acme.com");
    assert_eq!(entry.city, "Boston");
    assert_eq!(entry.state, "MA");
    assert_eq!(entry.record["name"], "Acme Corp");
    assert_eq!(entry.record["domain"], "acme.com");
}

#[tokio::test]
async fn test_refresh_and_status_pass_through() {
    let service = service_with(numbered_firms(2), Vec::new(), 100);

    let outcome = service.refresh(false).await.unwrap();
    assert!(outcome.rebuilt);
    assert_eq!(outcome.entity_count, 2);

    let status = service.status().await;
    assert!(status.built);
    assert_eq!(status.firm_count, 2);

    service.invalidate_cache().await;
    assert!(service.status().await.data_age_secs.is_none());
}
