//! reqwest-backed [`LocalRestApi`] implementation

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::LocalRestApi;
use crate::{
    config::ServerConfig,
    error::{ToolError, ToolResult},
};

/// HTTP client for the Obsidian Local REST API plugin
#[derive(Debug, Clone)]
pub struct HttpLocalRestApi {
    client:   reqwest::Client,
    base_url: String,
    api_key:  Option<String>,
    timeout:  Duration,
}

impl HttpLocalRestApi {
    /// Builds a client from the server configuration
    ///
    /// The configured request timeout is applied to every request.
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("obsidian-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.bearer_token().map(str::to_string),
            timeout: config.request_timeout,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transport_error(&self, path: &str, error: reqwest::Error) -> ToolError {
        if error.is_timeout() {
            ToolError::UpstreamTimeout {
                path:        path.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ToolError::UpstreamTransport {
                path:   path.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl LocalRestApi for HttpLocalRestApi {
    async fn post_json(&self, path: &str, body: &Value) -> ToolResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("POST {} returned HTTP {}", url, status);
            return Err(ToolError::UpstreamStatus {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ToolError::UpstreamMalformedBody {
                    path:   path.to_string(),
                    reason: e.to_string(),
                }
            } else {
                self.transport_error(path, e)
            }
        })
    }
}
