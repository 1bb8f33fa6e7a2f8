//! VC Dashboard Search - Main entry point
//!
//! Serves directory search over firms and companies as an MCP server on stdio.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vc_dashboard_search::client::{AsyncDirectoryClient, AsyncDirectoryClientImpl};
use vc_dashboard_search::repositories::{
    ApiCompanyRepository, ApiFirmRepository, CompanyRepository, CsvCompanyRepository,
    CsvFirmRepository, FirmRepository,
};
use vc_dashboard_search::{
    Config, DirectoryClient, DirectoryMcpServer, DirectorySearchTools, DirectoryService,
    DirectoryServiceImpl, Metrics,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Logging goes to stderr; stdout carries the MCP protocol
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();
    let mut firm_repos: Vec<Arc<dyn FirmRepository>> = Vec::new();
    let mut company_repos: Vec<Arc<dyn CompanyRepository>> = Vec::new();

    // API first so its companies win deduplication over CSV rows
    if let Some(ref url) = config.directory_api_url {
        info!("Using directory API at {}", url);
        let sync_client = DirectoryClient::from_config(&config, metrics.clone())?;
        let client =
            Arc::new(AsyncDirectoryClientImpl::new(sync_client)) as Arc<dyn AsyncDirectoryClient>;

        firm_repos.push(Arc::new(ApiFirmRepository::new(client.clone())));
        company_repos.push(Arc::new(ApiCompanyRepository::new(client)));
    }

    if let Some(ref path) = config.firms_csv_path {
        info!("Using firms CSV at {}", path.display());
        firm_repos.push(Arc::new(CsvFirmRepository::new(path.clone())));
    }

    if let Some(ref path) = config.companies_csv_path {
        info!("Using companies CSV at {}", path.display());
        company_repos.push(Arc::new(CsvCompanyRepository::new(path.clone())));
    }

    let refresh_ttl_secs = config.index_refresh_ttl_secs();
    let tools = DirectorySearchTools::new(
        firm_repos,
        company_repos,
        refresh_ttl_secs,
        metrics.clone(),
    )
    .with_retry_backoff(Duration::from_secs(config.refresh_retry_secs));

    let service = Arc::new(DirectoryServiceImpl::new(
        tools,
        config.default_search_limit,
        config.max_search_limit,
    )) as Arc<dyn DirectoryService>;

    // A failed initial load is retried by the first search
    match service.refresh(false).await {
        Ok(outcome) => info!(
            "Initial index: {} entities, {} terms",
            outcome.entity_count, outcome.term_count
        ),
        Err(e) => warn!("Initial index build failed: {}", e),
    }

    let server = DirectoryMcpServer::new(service, metrics);

    info!(
        "Index refresh TTL: {} minutes ({} seconds)",
        config.index_refresh_ttl_minutes, refresh_ttl_secs
    );

    info!("Starting MCP server with stdio transport");
    vc_dashboard_search::server::run_server(server).await?;

    info!("Directory search server shutdown complete");
    Ok(())
}
