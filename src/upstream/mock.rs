//! Mock Local REST API for testing
//!
//! [`MockLocalRestApi`] answers every request with a canned JSON body, an
//! injected error, or nothing at all for a while (delay injection), and
//! records each request so tests can assert on what was sent.
//!
//! # Examples
//!
//! ```
//! use obsidian_mcp::upstream::{LocalRestApi, MockLocalRestApi};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockLocalRestApi::new().with_response(json!({"ok": true}));
//!
//!     let body = api.post_json("/canvas/screenshot", &json!({})).await.unwrap();
//!     assert_eq!(body, json!({"ok": true}));
//!     assert_eq!(api.request_count(), 1);
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::time::sleep;

use super::LocalRestApi;
use crate::error::{ToolError, ToolResult};

/// 1x1 transparent PNG, base64-encoded
pub const MOCK_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// A request seen by [`MockLocalRestApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Endpoint path
    pub path: String,
    /// JSON body
    pub body: Value,
}

/// Mock Local REST API for tests and offline development
#[derive(Debug)]
pub struct MockLocalRestApi {
    /// Optional delay before answering
    delay:           Option<Duration>,
    /// Optional error returned instead of the response
    error_injection: Option<ToolError>,
    /// Body returned on success
    response:        Value,
    /// Every request received, in order
    requests:        Mutex<Vec<RecordedRequest>>,
}

impl MockLocalRestApi {
    /// Creates a mock that answers with a valid canvas screenshot body
    pub fn new() -> Self {
        Self {
            delay:           None,
            error_injection: None,
            response:        json!({ "image": MOCK_PNG_BASE64, "mimeType": "image/png" }),
            requests:        Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with `response`
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    /// Fails every request with `error`
    pub fn with_error(mut self, error: ToolError) -> Self {
        self.error_injection = Some(error);
        self
    }

    /// Waits `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Snapshot of all requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl Default for MockLocalRestApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalRestApi for MockLocalRestApi {
    async fn post_json(&self, path: &str, body: &Value) -> ToolResult<Value> {
        self.requests.lock().push(RecordedRequest {
            path: path.to_string(),
            body: body.clone(),
        });

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        match &self.error_injection {
            Some(error) => Err(error.clone()),
            None => Ok(self.response.clone()),
        }
    }
}
