//! obsidian-mcp: MCP server for Obsidian vaults
//!
//! Speaks MCP over stdio and forwards tool calls to the Obsidian Local REST
//! API plugin.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use obsidian_mcp::{
    canvas::CanvasScreenshotTool, config::ServerConfig, mcp::ObsidianMcpServer,
    upstream::HttpLocalRestApi,
};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP stream, so logs go to stderr
    // Respects RUST_LOG environment variable
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("obsidian_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();

    info!("obsidian-mcp server starting...");

    // Flags and OBSIDIAN_* variables; exits with usage on bad values
    let config = ServerConfig::parse();
    if config.bearer_token().is_none() {
        warn!("OBSIDIAN_API_KEY is not set; the Local REST API will likely reject requests");
    }

    let api = Arc::new(HttpLocalRestApi::new(&config).context("Failed to build HTTP client")?);
    info!("Local REST API: {}", api.base_url());

    let screenshot = Arc::new(CanvasScreenshotTool::new(api, config.request_timeout));
    let server = ObsidianMcpServer::new(screenshot, &config.disabled_tool_names());
    info!("Enabled tools: {}", server.enabled_tools().join(", "));

    // Start the server with stdio transport
    let service = server.serve(stdio()).await?;
    info!("Server info: {:?}", service.peer_info());

    // Wait for the service to complete (blocks until shutdown)
    service.waiting().await?;

    info!("obsidian-mcp server shutting down");
    Ok(())
}
