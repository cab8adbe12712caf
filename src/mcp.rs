//! MCP service implementation with tool routing
//!
//! This module provides the obsidian-mcp server: tool registration,
//! `DISABLED_TOOLS` filtering, and the mapping from [`ToolError`] to MCP
//! errors.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        common::cached_schema_for_type, router::tool::ToolRouter, wrapper::Parameters,
    },
    model::{CallToolResult, Implementation, JsonObject, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    canvas::CanvasScreenshotTool,
    config::DEFAULT_REQUEST_TIMEOUT,
    error::{ErrorKind, ToolError},
    mcp_content::success_result,
    model::ScreenshotCanvasParams,
    tool_groups::expand_tool_names,
    upstream::MockLocalRestApi,
};

/// Instructions advertised to MCP clients
const SERVER_INSTRUCTIONS: &str = "Tools for working with an Obsidian vault through the Local \
                                   REST API plugin. Use screenshot_canvas to see the contents of \
                                   a .canvas file as an image.";

/// Converts a ToolError to an MCP ErrorData
///
/// Bad input maps to `invalid_params`; upstream failures and unexpected
/// upstream responses map to `internal_error`. The error kind and a
/// remediation hint travel in `data` so clients can tell them apart.
pub fn convert_tool_error_to_mcp(error: ToolError) -> McpError {
    let message = error.to_string();
    let data = Some(json!({
        "kind": error.kind(),
        "hint": error.remediation_hint(),
    }));

    match error.kind() {
        ErrorKind::InvalidArguments => McpError::invalid_params(message, data),
        ErrorKind::UpstreamError | ErrorKind::InvalidResponseShape => {
            McpError::internal_error(message, data)
        }
    }
}

/// Obsidian MCP server
///
/// # Tools
///
/// - `screenshot_canvas`: Render a canvas file to an image
#[derive(Clone)]
pub struct ObsidianMcpServer {
    /// Tool router for dispatching tool calls
    tool_router: ToolRouter<Self>,
    /// Canvas screenshot tool shared across invocations
    screenshot:  Arc<CanvasScreenshotTool>,
}

#[tool_router]
impl ObsidianMcpServer {
    /// Creates a server, removing every tool named in `disabled_tools`
    ///
    /// `disabled_tools` may contain tool names and `@group` shortcuts.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{sync::Arc, time::Duration};
    ///
    /// use obsidian_mcp::{
    ///     canvas::CanvasScreenshotTool, mcp::ObsidianMcpServer, upstream::MockLocalRestApi,
    /// };
    ///
    /// let api = Arc::new(MockLocalRestApi::new());
    /// let tool = Arc::new(CanvasScreenshotTool::new(api, Duration::from_secs(5)));
    ///
    /// let server = ObsidianMcpServer::new(tool.clone(), &[]);
    /// assert!(server.is_tool_enabled("screenshot_canvas"));
    ///
    /// let server = ObsidianMcpServer::new(tool, &["screenshot_canvas".to_string()]);
    /// assert!(!server.is_tool_enabled("screenshot_canvas"));
    /// ```
    pub fn new(screenshot: Arc<CanvasScreenshotTool>, disabled_tools: &[String]) -> Self {
        let mut tool_router = Self::tool_router();

        for name in expand_tool_names(disabled_tools) {
            if tool_router.has_route(&name) {
                tool_router.remove_route(&name);
                info!("Tool disabled: {}", name);
            } else {
                debug!("Disabled tool '{}' is not registered by this server", name);
            }
        }

        Self {
            tool_router,
            screenshot,
        }
    }

    /// Creates a server backed by [`MockLocalRestApi`] for testing
    pub fn new_with_mock() -> Self {
        let api = Arc::new(MockLocalRestApi::new());
        let screenshot = Arc::new(CanvasScreenshotTool::new(api, DEFAULT_REQUEST_TIMEOUT));
        Self::new(screenshot, &[])
    }

    /// Names of all tools this server currently exposes
    pub fn enabled_tools(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    /// Returns true if `name` is registered and not disabled
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        self.tool_router.has_route(name)
    }

    /// Captures a screenshot of a canvas file
    ///
    /// # Examples
    ///
    /// Request:
    /// ```json
    /// {
    ///   "method": "tools/call",
    ///   "params": {
    ///     "name": "screenshot_canvas",
    ///     "arguments": { "filename": "folder/mycanvas.canvas" }
    ///   }
    /// }
    /// ```
    ///
    /// Response:
    /// ```json
    /// {
    ///   "content": [{ "type": "image", "data": "iVBORw0KGgo...", "mimeType": "image/png" }]
    /// }
    /// ```
    ///
    /// Arguments arrive as a raw object and are checked by
    /// [`CanvasScreenshotTool::call`], so a missing or mistyped `filename`
    /// is reported as `InvalidArguments` like any other bad input.
    #[tool(
        description = "Capture a screenshot of an Obsidian canvas file. Returns the image as \
                       base64 PNG. The canvas will be automatically opened if not already \
                       visible, and zoomed to fit all content.",
        input_schema = cached_schema_for_type::<ScreenshotCanvasParams>()
    )]
    pub async fn screenshot_canvas(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let content = self
            .screenshot
            .call(&Value::Object(arguments))
            .await
            .map_err(convert_tool_error_to_mcp)?;

        Ok(success_result(content))
    }
}

impl Default for ObsidianMcpServer {
    fn default() -> Self {
        Self::new_with_mock()
    }
}

#[tool_handler]
impl ServerHandler for ObsidianMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rmcp::model::ErrorCode;

    use super::*;
    use crate::canvas::screenshot::TOOL_NAME as SCREENSHOT_TOOL_NAME;

    fn arguments(value: Value) -> Parameters<JsonObject> {
        match value {
            Value::Object(object) => Parameters(object),
            other => panic!("arguments must be an object, got {other}"),
        }
    }

    fn server_with(
        api: MockLocalRestApi,
        disabled: &[&str],
    ) -> (ObsidianMcpServer, Arc<MockLocalRestApi>) {
        let api = Arc::new(api);
        let tool = Arc::new(CanvasScreenshotTool::new(api.clone(), Duration::from_secs(5)));
        let disabled: Vec<String> = disabled.iter().map(|s| s.to_string()).collect();
        (ObsidianMcpServer::new(tool, &disabled), api)
    }

    #[test]
    fn test_server_creation_with_mock() {
        let server = ObsidianMcpServer::new_with_mock();
        assert_eq!(server.enabled_tools(), vec![SCREENSHOT_TOOL_NAME.to_string()]);
    }

    #[test]
    fn test_server_default() {
        let server = ObsidianMcpServer::default();
        assert!(server.is_tool_enabled(SCREENSHOT_TOOL_NAME));
    }

    #[test]
    fn test_tool_schema_and_description() {
        let server = ObsidianMcpServer::new_with_mock();
        let tools = server.tool_router.list_all();

        assert_eq!(tools.len(), 1);
        let tool = &tools[0];
        assert!(tool.description.as_deref().unwrap_or_default().contains("canvas"));

        let schema = Value::Object(tool.input_schema.as_ref().clone());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["filename"]));
        assert_eq!(schema["properties"]["filename"]["type"], "string");
    }

    #[test]
    fn test_disable_by_name() {
        let (server, _) = server_with(MockLocalRestApi::new(), &["screenshot_canvas"]);
        assert!(server.enabled_tools().is_empty());
    }

    #[test]
    fn test_disable_unrelated_groups_keeps_screenshot() {
        let (server, _) = server_with(MockLocalRestApi::new(), &["@write", "@search", "@nope"]);
        assert!(server.is_tool_enabled(SCREENSHOT_TOOL_NAME));
    }

    #[tokio::test]
    async fn test_screenshot_canvas_success() {
        let (server, api) = server_with(
            MockLocalRestApi::new().with_response(json!({"image": "abc", "mimeType": "image/png"})),
            &[],
        );

        let result = server
            .screenshot_canvas(arguments(json!({"filename": "a.canvas"})))
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
        let image = result.content[0].as_image().unwrap();
        assert_eq!(image.data, "abc");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_screenshot_canvas_empty_filename() {
        let (server, api) = server_with(MockLocalRestApi::new(), &[]);

        let error = server
            .screenshot_canvas(arguments(json!({"filename": ""})))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_screenshot_canvas_bad_filename_carries_kind() {
        let (server, api) = server_with(MockLocalRestApi::new(), &[]);

        for bad in [json!({}), json!({"filename": null}), json!({"filename": 42})] {
            let error = server.screenshot_canvas(arguments(bad.clone())).await.unwrap_err();

            assert_eq!(error.code, ErrorCode::INVALID_PARAMS, "{bad}");
            let kind = error.data.as_ref().and_then(|d| d["kind"].as_str());
            assert_eq!(kind, Some("InvalidArguments"), "{bad}");
        }
        assert_eq!(api.request_count(), 0);
    }

    mod error_conversion {
        use super::*;

        fn kind_of(error: &McpError) -> &str {
            error.data.as_ref().and_then(|d| d["kind"].as_str()).unwrap_or_default()
        }

        #[test]
        fn test_invalid_argument_maps_to_invalid_params() {
            let error = convert_tool_error_to_mcp(ToolError::invalid_argument(
                "filename",
                "must not be empty",
            ));

            assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
            assert_eq!(kind_of(&error), "InvalidArguments");
            assert!(error.message.contains("filename"));
        }

        #[test]
        fn test_upstream_error_maps_to_internal_error() {
            let error = convert_tool_error_to_mcp(ToolError::UpstreamStatus {
                path:   "/canvas/screenshot".to_string(),
                status: 404,
                body:   "Not Found".to_string(),
            });

            assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
            assert_eq!(kind_of(&error), "UpstreamError");
            assert!(error.message.contains("404"));
        }

        #[test]
        fn test_invalid_shape_maps_to_internal_error() {
            let error = convert_tool_error_to_mcp(ToolError::InvalidResponseShape {
                path:   "/canvas/screenshot".to_string(),
                reason: "missing field `mimeType`".to_string(),
            });

            assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
            assert_eq!(kind_of(&error), "InvalidResponseShape");
        }

        #[test]
        fn test_hint_is_included() {
            let error = convert_tool_error_to_mcp(ToolError::UpstreamTimeout {
                path:        "/canvas/screenshot".to_string(),
                duration_ms: 100,
            });

            let hint = error.data.as_ref().unwrap()["hint"].as_str().unwrap();
            assert!(hint.contains("OBSIDIAN_REQUEST_TIMEOUT_MS"));
        }
    }
}
