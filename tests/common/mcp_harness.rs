//! MCP Server Test Harness
//!
//! Provides reusable fixtures for exercising the obsidian-mcp server against
//! a mock Local REST API.
//!
//! # Usage
//!
//! ```rust
//! use common::mcp_harness::{ContentValidator, McpTestContext};
//!
//! #[tokio::test]
//! async fn test_capture() {
//!     let ctx = McpTestContext::new_with_mock();
//!     let result = ctx.screenshot_canvas("board.canvas").await.unwrap();
//!     let image = ContentValidator::validate_image_result(&result).unwrap();
//!     assert!(ContentValidator::is_valid_png(&image.bytes));
//! }
//! ```

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use obsidian_mcp::{
    canvas::CanvasScreenshotTool, mcp::ObsidianMcpServer, upstream::MockLocalRestApi,
};
use rmcp::{
    RoleClient, ServiceError, ServiceExt,
    handler::server::wrapper::Parameters,
    model::{CallToolRequestParam, CallToolResult, ErrorData, JsonObject},
    service::RunningService,
};
use serde_json::{Value, json};

/// Test fixture for MCP server integration tests
pub struct McpTestContext {
    /// The MCP server instance
    pub server: ObsidianMcpServer,
    /// Mock upstream, for inspecting recorded requests
    pub api:    Arc<MockLocalRestApi>,
}

impl McpTestContext {
    /// Create test context with a default MockLocalRestApi
    pub fn new_with_mock() -> Self {
        Self::new_with_configured_mock(MockLocalRestApi::new())
    }

    /// Create test context with a configured MockLocalRestApi
    ///
    /// Use this to inject responses, errors or delays.
    pub fn new_with_configured_mock(mock: MockLocalRestApi) -> Self {
        Self::build(mock, Duration::from_secs(5), &[])
    }

    /// Create test context with a custom upstream timeout
    pub fn new_with_timeout(mock: MockLocalRestApi, timeout: Duration) -> Self {
        Self::build(mock, timeout, &[])
    }

    /// Create test context with a `DISABLED_TOOLS` list
    pub fn new_with_disabled(disabled: &[&str]) -> Self {
        Self::build(MockLocalRestApi::new(), Duration::from_secs(5), disabled)
    }

    fn build(mock: MockLocalRestApi, timeout: Duration, disabled: &[&str]) -> Self {
        let api = Arc::new(mock);
        let tool = Arc::new(CanvasScreenshotTool::new(api.clone(), timeout));
        let disabled: Vec<String> = disabled.iter().map(|s| s.to_string()).collect();
        let server = ObsidianMcpServer::new(tool, &disabled);
        Self { server, api }
    }

    /// Call screenshot_canvas tool
    pub async fn screenshot_canvas(&self, filename: &str) -> Result<CallToolResult, ErrorData> {
        self.call_screenshot_canvas(json!({ "filename": filename })).await
    }

    /// Call screenshot_canvas tool with raw arguments
    pub async fn call_screenshot_canvas(&self, arguments: Value) -> Result<CallToolResult, ErrorData> {
        self.server
            .screenshot_canvas(Parameters(into_object(arguments)))
            .await
    }

    /// Serves the server over an in-memory stream and connects a client to it
    pub async fn connect_client(&self) -> RunningService<RoleClient, ()> {
        let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);

        let server = self.server.clone();
        tokio::spawn(async move {
            let service = server.serve(server_transport).await?;
            service.waiting().await?;
            anyhow::Ok(())
        });

        ().serve(client_transport).await.expect("client should connect")
    }

    /// Number of requests the mock upstream has seen
    pub fn request_count(&self) -> usize {
        self.api.request_count()
    }
}

/// Calls a tool through a connected client, unwrapping the protocol error
pub async fn call_tool_over_mcp(
    client: &RunningService<RoleClient, ()>,
    name: &'static str,
    arguments: Value,
) -> Result<CallToolResult, ErrorData> {
    let request = CallToolRequestParam {
        name:      name.into(),
        arguments: Some(into_object(arguments)),
    };

    match client.call_tool(request).await {
        Ok(result) => Ok(result),
        Err(ServiceError::McpError(error)) => Err(error),
        Err(other) => panic!("unexpected service error: {other}"),
    }
}

fn into_object(arguments: Value) -> JsonObject {
    match arguments {
        Value::Object(object) => object,
        other => panic!("tool arguments must be an object, got {other}"),
    }
}

/// Image part of a tool result
#[derive(Debug)]
pub struct ImageParts {
    /// Base64 data as received
    pub data:      String,
    pub mime_type: String,
    /// Decoded bytes
    pub bytes:     Vec<u8>,
}

/// Validates MCP content structure
pub struct ContentValidator;

impl ContentValidator {
    /// Checks the result holds exactly one image item and decodes it
    pub fn validate_image_result(result: &CallToolResult) -> Result<ImageParts, String> {
        if result.is_error.unwrap_or(false) {
            return Err("result is flagged as error".to_string());
        }
        if result.content.len() != 1 {
            return Err(format!("expected 1 content item, got {}", result.content.len()));
        }

        let image = result.content[0]
            .as_image()
            .ok_or_else(|| "content item is not an image".to_string())?;
        let bytes = STANDARD
            .decode(&image.data)
            .map_err(|e| format!("image data is not base64: {e}"))?;

        Ok(ImageParts {
            data: image.data.clone(),
            mime_type: image.mime_type.clone(),
            bytes,
        })
    }

    /// PNG magic bytes
    pub fn is_valid_png(bytes: &[u8]) -> bool {
        bytes.starts_with(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a])
    }

    /// Error kind carried in MCP error data
    pub fn error_kind(error: &ErrorData) -> Option<String> {
        error.data.as_ref()?["kind"].as_str().map(str::to_string)
    }
}
