//! Error types for tool invocations
//!
//! Every failure a tool can produce falls into one of three kinds (see
//! [`ErrorKind`]) so that MCP clients can tell bad input apart from an
//! unreachable host and from a host that answered with something unexpected.
//! Each error also carries an actionable remediation hint.

use std::fmt;

use serde::Serialize;

/// Result type alias for tool operations
pub type ToolResult<T> = Result<T, ToolError>;

/// Coarse classification of a [`ToolError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Tool arguments were missing or malformed; nothing was sent upstream
    InvalidArguments,
    /// The upstream call failed, was rejected, or timed out
    UpstreamError,
    /// The upstream answered 2xx but the body did not match the expected shape
    InvalidResponseShape,
}

impl ErrorKind {
    /// Returns the kind as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArguments => "InvalidArguments",
            ErrorKind::UpstreamError => "UpstreamError",
            ErrorKind::InvalidResponseShape => "InvalidResponseShape",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for tool invocations
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    /// A tool argument is missing or has the wrong type or value
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        parameter: String,
        /// Why it was rejected
        reason:    String,
    },

    /// The request never completed at the transport level
    #[error("Request to {path} failed: {reason}")]
    UpstreamTransport {
        /// Endpoint path that was requested
        path:   String,
        /// Underlying transport failure
        reason: String,
    },

    /// The upstream answered with a non-success status
    #[error("Request to {path} was rejected with HTTP {status}: {body}")]
    UpstreamStatus {
        /// Endpoint path that was requested
        path:   String,
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body:   String,
    },

    /// The upstream did not answer within the configured timeout
    #[error("Request to {path} timed out after {duration_ms}ms")]
    UpstreamTimeout {
        /// Endpoint path that was requested
        path:        String,
        /// Timeout in milliseconds
        duration_ms: u64,
    },

    /// The upstream answered 2xx but the body was not JSON
    #[error("Response from {path} is not valid JSON: {reason}")]
    UpstreamMalformedBody {
        /// Endpoint path that was requested
        path:   String,
        /// Parse failure
        reason: String,
    },

    /// The upstream body was JSON but did not match the expected schema
    #[error("Unexpected response shape from {path}: {reason}")]
    InvalidResponseShape {
        /// Endpoint path that was requested
        path:   String,
        /// Schema violation
        reason: String,
    },
}

impl ToolError {
    /// Creates an [`ToolError::InvalidArgument`] error
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason:    reason.into(),
        }
    }

    /// Returns the coarse kind of this error
    ///
    /// # Examples
    ///
    /// ```
    /// use obsidian_mcp::error::{ErrorKind, ToolError};
    ///
    /// let error = ToolError::invalid_argument("filename", "must not be empty");
    /// assert_eq!(error.kind(), ErrorKind::InvalidArguments);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::InvalidArgument { .. } => ErrorKind::InvalidArguments,
            ToolError::UpstreamTransport { .. }
            | ToolError::UpstreamStatus { .. }
            | ToolError::UpstreamTimeout { .. }
            | ToolError::UpstreamMalformedBody { .. } => ErrorKind::UpstreamError,
            ToolError::InvalidResponseShape { .. } => ErrorKind::InvalidResponseShape,
        }
    }

    /// Returns an actionable remediation hint for this error
    pub fn remediation_hint(&self) -> &str {
        match self {
            ToolError::InvalidArgument { parameter, .. } => match parameter.as_str() {
                "filename" => {
                    "Pass the vault-relative path of a .canvas file, e.g. \
                     'folder/mycanvas.canvas'."
                }
                _ => "Check the argument against the tool's input schema.",
            },
            ToolError::UpstreamTransport { .. } => {
                "Make sure Obsidian is running with the Local REST API plugin enabled, and that \
                 OBSIDIAN_HOST, OBSIDIAN_PORT and OBSIDIAN_USE_HTTP match the plugin settings."
            }
            ToolError::UpstreamStatus { status, .. } => match status {
                401 | 403 => {
                    "The Local REST API rejected the credentials. Set OBSIDIAN_API_KEY to the key \
                     shown in the plugin settings."
                }
                404 => {
                    "The endpoint or file was not found. Check the file path and that the \
                     installed plugin version supports canvas screenshots."
                }
                _ => "Obsidian rejected the request. Check the Obsidian developer console for details.",
            },
            ToolError::UpstreamTimeout { .. } => {
                "Obsidian did not answer in time. Large canvases take longer to render; raise \
                 OBSIDIAN_REQUEST_TIMEOUT_MS and retry."
            }
            ToolError::UpstreamMalformedBody { .. } | ToolError::InvalidResponseShape { .. } => {
                "Obsidian returned a response this server does not understand. Make sure the \
                 Obsidian plugin and this server are the same version."
            }
        }
    }
}
