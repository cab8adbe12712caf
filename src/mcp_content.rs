//! MCP content builders for tool results
//!
//! Upstream screenshots already arrive base64-encoded, so the image data is
//! handed to the client exactly as received.

use rmcp::model::{CallToolResult, Content};

use crate::model::CanvasScreenshotResponse;

/// Builds MCP image content from an already base64-encoded image
///
/// # Examples
///
/// ```
/// use obsidian_mcp::mcp_content::build_image_content;
///
/// let content = build_image_content("iVBORw0KGgo=", "image/png");
/// let image = content.as_image().unwrap();
/// assert_eq!(image.data, "iVBORw0KGgo=");
/// assert_eq!(image.mime_type, "image/png");
/// ```
pub fn build_image_content(base64_data: &str, mime_type: &str) -> Content {
    Content::image(base64_data, mime_type)
}

/// Builds the content list for a canvas screenshot: a single image item
pub fn build_screenshot_content(response: &CanvasScreenshotResponse) -> Vec<Content> {
    vec![build_image_content(&response.image, &response.mime_type)]
}

/// Wraps content in a successful tool result
pub fn success_result(content: Vec<Content>) -> CallToolResult {
    CallToolResult::success(content)
}
