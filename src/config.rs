//! Server configuration from command-line flags and environment variables
//!
//! Every flag can also be set through its environment variable, which is how
//! MCP clients usually configure servers.
//!
//! | variable | flag | default |
//! |---|---|---|
//! | `OBSIDIAN_API_KEY` | `--api-key` | unset |
//! | `OBSIDIAN_HOST` | `--host` | `127.0.0.1` |
//! | `OBSIDIAN_USE_HTTP` | `--use-http` | `false` |
//! | `OBSIDIAN_PORT` | `--port` | `27124` (https) / `27123` (http) |
//! | `OBSIDIAN_ACCEPT_INVALID_CERTS` | `--accept-invalid-certs` | `true` |
//! | `OBSIDIAN_REQUEST_TIMEOUT_MS` | `--request-timeout-ms` | `30000` |
//! | `DISABLED_TOOLS` | `--disabled-tools` | empty |

use std::time::Duration;

use clap::{ArgAction, Parser, builder::BoolishValueParser};

/// Default Local REST API host
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port of the Local REST API https server
pub const DEFAULT_HTTPS_PORT: u16 = 27124;
/// Default port of the Local REST API plain http server
pub const DEFAULT_HTTP_PORT: u16 = 27123;
/// Default timeout for one upstream request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the MCP server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "obsidian-mcp", author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Bearer token for the Local REST API
    #[arg(long, env = "OBSIDIAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Host the Local REST API listens on
    #[arg(long, env = "OBSIDIAN_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port the Local REST API listens on [default: 27124, or 27123 with --use-http]
    #[arg(long, env = "OBSIDIAN_PORT")]
    pub port: Option<u16>,

    /// Use plain http instead of https
    #[arg(
        long,
        env = "OBSIDIAN_USE_HTTP",
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub use_http: bool,

    /// Accept the plugin's self-signed certificate
    #[arg(
        long,
        env = "OBSIDIAN_ACCEPT_INVALID_CERTS",
        action = ArgAction::Set,
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    pub accept_invalid_certs: bool,

    /// Upper bound for a single upstream request, in milliseconds
    #[arg(
        long = "request-timeout-ms",
        env = "OBSIDIAN_REQUEST_TIMEOUT_MS",
        value_name = "MS",
        default_value = "30000",
        value_parser = parse_timeout_ms
    )]
    pub request_timeout: Duration,

    /// Tool names or `@group` shortcuts to hide from clients, comma-separated
    #[arg(
        long,
        env = "DISABLED_TOOLS",
        value_delimiter = ',',
        value_parser = parse_tool_name
    )]
    pub disabled_tools: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key:              None,
            host:                 DEFAULT_HOST.to_string(),
            port:                 None,
            use_http:             false,
            accept_invalid_certs: true,
            request_timeout:      DEFAULT_REQUEST_TIMEOUT,
            disabled_tools:       Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Bearer token to send, if a non-blank key is configured
    pub fn bearer_token(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// Port to connect to, falling back to the plugin default for the scheme
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None if self.use_http => DEFAULT_HTTP_PORT,
            None => DEFAULT_HTTPS_PORT,
        }
    }

    /// URL scheme for the Local REST API
    pub fn scheme(&self) -> &'static str {
        if self.use_http { "http" } else { "https" }
    }

    /// Base URL of the Local REST API, without a trailing slash
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use obsidian_mcp::config::ServerConfig;
    ///
    /// let config = ServerConfig::try_parse_from(["obsidian-mcp", "--use-http", "true"]).unwrap();
    /// assert_eq!(config.base_url(), "http://127.0.0.1:27123");
    /// ```
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port())
    }

    /// `DISABLED_TOOLS` entries with blank items dropped
    pub fn disabled_tool_names(&self) -> Vec<String> {
        self.disabled_tools
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect()
    }
}

fn parse_timeout_ms(value: &str) -> Result<Duration, String> {
    match value.trim().parse::<u64>().map_err(|e| e.to_string())? {
        0 => Err("timeout must be greater than 0".to_string()),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn parse_tool_name(value: &str) -> Result<String, String> {
    Ok(value.trim().to_string())
}
