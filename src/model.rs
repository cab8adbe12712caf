//! Data models for tool arguments and Local REST API payloads
//!
//! Arguments and upstream responses are both checked at the boundary: they
//! are parsed into typed values here and rejected with a [`ToolError`] when
//! they do not match, rather than being passed on as loose JSON.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Parameters for the `screenshot_canvas` tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ScreenshotCanvasParams {
    /// Path to the .canvas file in the vault (e.g., 'folder/mycanvas.canvas')
    pub filename: String,
}

impl ScreenshotCanvasParams {
    /// Creates params for the given vault-relative path
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    /// Parses raw tool arguments
    ///
    /// The arguments must be an object holding a non-empty string `filename`.
    ///
    /// # Examples
    ///
    /// ```
    /// use obsidian_mcp::{error::ErrorKind, model::ScreenshotCanvasParams};
    /// use serde_json::json;
    ///
    /// let params = ScreenshotCanvasParams::from_arguments(&json!({"filename": "a.canvas"}));
    /// assert_eq!(params.unwrap().filename, "a.canvas");
    ///
    /// let error = ScreenshotCanvasParams::from_arguments(&json!({})).unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::InvalidArguments);
    /// ```
    pub fn from_arguments(arguments: &Value) -> ToolResult<Self> {
        let object = arguments
            .as_object()
            .ok_or_else(|| ToolError::invalid_argument("arguments", "expected a JSON object"))?;

        let filename = match object.get("filename") {
            None | Some(Value::Null) => {
                return Err(ToolError::invalid_argument("filename", "is required"));
            }
            Some(Value::String(filename)) => filename.clone(),
            Some(other) => {
                return Err(ToolError::invalid_argument(
                    "filename",
                    format!("expected a string, got {}", json_type_name(other)),
                ));
            }
        };

        let params = Self { filename };
        params.validate()?;
        Ok(params)
    }

    /// Checks the value constraints that the type alone cannot express
    ///
    /// Only the empty string is rejected; whether a path names a renderable
    /// canvas is up to Obsidian.
    pub fn validate(&self) -> ToolResult<()> {
        if self.filename.is_empty() {
            return Err(ToolError::invalid_argument("filename", "must not be empty"));
        }
        Ok(())
    }
}

/// Request body for `POST /canvas/screenshot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasScreenshotRequest {
    /// Vault-relative path of the canvas file
    pub filename: String,
}

impl From<&ScreenshotCanvasParams> for CanvasScreenshotRequest {
    fn from(params: &ScreenshotCanvasParams) -> Self {
        Self {
            filename: params.filename.clone(),
        }
    }
}

/// Response body of `POST /canvas/screenshot`
///
/// Both fields are required. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasScreenshotResponse {
    /// Base64-encoded image
    pub image:     String,
    /// MIME type of the image, e.g. `image/png`
    pub mime_type: String,
}

impl CanvasScreenshotResponse {
    /// Validates an upstream body against the response schema
    ///
    /// Any mismatch, including a missing field or a field of the wrong type,
    /// becomes [`ToolError::InvalidResponseShape`].
    pub fn from_upstream(path: &str, body: Value) -> ToolResult<Self> {
        serde_json::from_value(body).map_err(|e| ToolError::InvalidResponseShape {
            path:   path.to_string(),
            reason: e.to_string(),
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
