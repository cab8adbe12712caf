//! The `screenshot_canvas` tool
//!
//! One invocation makes one pass: validate the arguments, send one
//! `POST /canvas/screenshot`, check the response shape, and return a single
//! image item. Opening the canvas, zooming to fit and rasterizing all happen
//! inside Obsidian behind that request.

use std::{sync::Arc, time::Duration};

use rmcp::model::Content;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{
    error::{ToolError, ToolResult},
    mcp_content::build_screenshot_content,
    model::{CanvasScreenshotRequest, CanvasScreenshotResponse, ScreenshotCanvasParams},
    upstream::LocalRestApi,
};

/// Tool name as registered with MCP clients
pub const TOOL_NAME: &str = "screenshot_canvas";

/// Local REST API endpoint that renders a canvas
pub const SCREENSHOT_PATH: &str = "/canvas/screenshot";

/// Captures canvas screenshots through the Local REST API
pub struct CanvasScreenshotTool {
    api:     Arc<dyn LocalRestApi>,
    timeout: Duration,
}

impl CanvasScreenshotTool {
    /// Creates the tool on top of an upstream client
    ///
    /// `timeout` bounds each upstream request regardless of what the client
    /// itself enforces.
    pub fn new(api: Arc<dyn LocalRestApi>, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Runs the tool on raw JSON arguments
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{sync::Arc, time::Duration};
    ///
    /// use obsidian_mcp::{canvas::screenshot::CanvasScreenshotTool, upstream::MockLocalRestApi};
    /// use serde_json::json;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let api = Arc::new(MockLocalRestApi::new());
    ///     let tool = CanvasScreenshotTool::new(api, Duration::from_secs(5));
    ///
    ///     let content = tool.call(&json!({"filename": "board.canvas"})).await.unwrap();
    ///     assert_eq!(content.len(), 1);
    /// }
    /// ```
    pub async fn call(&self, arguments: &Value) -> ToolResult<Vec<Content>> {
        let params = ScreenshotCanvasParams::from_arguments(arguments)?;
        self.capture(&params).await
    }

    /// Runs the tool on typed parameters
    pub async fn capture(&self, params: &ScreenshotCanvasParams) -> ToolResult<Vec<Content>> {
        let response = self.fetch(params).await?;
        Ok(build_screenshot_content(&response))
    }

    /// Requests a screenshot and validates the upstream response
    pub async fn fetch(
        &self,
        params: &ScreenshotCanvasParams,
    ) -> ToolResult<CanvasScreenshotResponse> {
        params.validate()?;

        let request = CanvasScreenshotRequest::from(params);
        let body = serde_json::to_value(&request)
            .map_err(|e| ToolError::invalid_argument("filename", e.to_string()))?;

        debug!("Requesting canvas screenshot for '{}'", request.filename);

        let upstream = match timeout(self.timeout, self.api.post_json(SCREENSHOT_PATH, &body)).await
        {
            Ok(result) => result,
            Err(_) => Err(ToolError::UpstreamTimeout {
                path:        SCREENSHOT_PATH.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }),
        };

        let body = upstream.inspect_err(|e| warn!("Canvas screenshot request failed: {}", e))?;
        let response = CanvasScreenshotResponse::from_upstream(SCREENSHOT_PATH, body)
            .inspect_err(|e| warn!("{}", e))?;

        debug!(
            "Canvas screenshot received: {} ({} base64 chars)",
            response.mime_type,
            response.image.len()
        );
        Ok(response)
    }
}
