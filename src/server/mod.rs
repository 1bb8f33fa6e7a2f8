//! MCP server for the VC dashboard directory.
//!
//! Exposes firm and company search to MCP clients over stdio.

pub mod handlers;

pub use handlers::DirectoryMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the directory MCP server with stdio transport until the client disconnects.
pub async fn run_server(server: DirectoryMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
