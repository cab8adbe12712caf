//! Access to the Obsidian Local REST API
//!
//! Tools talk to Obsidian only through the [`LocalRestApi`] trait. The
//! production implementation is [`HttpLocalRestApi`]; [`MockLocalRestApi`]
//! serves canned responses for tests and offline development.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolResult;

pub mod http;
pub mod mock;

pub use http::HttpLocalRestApi;
pub use mock::MockLocalRestApi;

/// Capability: issue JSON requests against the Local REST API.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait LocalRestApi: Send + Sync {
    /// POSTs `body` as JSON to `path` and returns the parsed JSON response.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses and non-JSON bodies are all
    /// reported as upstream errors (see [`crate::error::ErrorKind::UpstreamError`]).
    async fn post_json(&self, path: &str, body: &Value) -> ToolResult<Value>;
}
