//! Error types for tool invocation.

use thiserror::Error;

/// Client error type.
///
/// Every failure that happens after a tool name has been accepted carries
/// that name, so callers can report which call went wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool name was empty or blank. Raised before any I/O.
    #[error("Invalid tool name: expected a non-empty identifier")]
    InvalidTool,

    /// Endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Endpoint URL uses a scheme other than `http` or `https`.
    #[error("Invalid URL: unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    /// Content type is empty or not a valid header value.
    #[error("Invalid content type: {0:?}")]
    InvalidContentType(String),

    /// The HTTP client or a request could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// A typed tool wrapper rejected its arguments before sending.
    #[error("Invalid argument for tool '{tool}': {message}")]
    InvalidArgument {
        /// Tool being invoked.
        tool: String,
        /// What was wrong.
        message: String,
    },

    /// Request body could not be serialized.
    #[error("Failed to encode request for tool '{tool}': {source}")]
    Encode {
        /// Tool being invoked.
        tool: String,
        /// Serializer error.
        source: serde_json::Error,
    },

    /// Connection could not be established, timed out, or dropped while
    /// reading the body.
    #[error("Transport error calling tool '{tool}': {source}")]
    Transport {
        /// Tool being invoked.
        tool: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// Endpoint answered with a non-success status code.
    #[error("Remote error calling tool '{tool}' ({status}): {message}")]
    Remote {
        /// Tool being invoked.
        tool: String,
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Response body was not valid JSON, or did not match the expected shape.
    #[error("Failed to decode response from tool '{tool}': {source}")]
    Decode {
        /// Tool being invoked.
        tool: String,
        /// Parser error.
        source: serde_json::Error,
    },

    /// Tool replied successfully but reported a failure in its payload.
    #[error("Tool '{tool}' reported an error: {message}")]
    Tool {
        /// Tool being invoked.
        tool: String,
        /// Error message from the tool.
        message: String,
    },
}

impl Error {
    /// Name of the tool whose invocation failed, when known.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::Encode { tool, .. }
            | Self::InvalidArgument { tool, .. }
            | Self::Transport { tool, .. }
            | Self::Remote { tool, .. }
            | Self::Decode { tool, .. }
            | Self::Tool { tool, .. } => Some(tool),
            Self::InvalidTool
            | Self::InvalidUrl(_)
            | Self::UnsupportedScheme(_)
            | Self::InvalidContentType(_)
            | Self::Client(_) => None,
        }
    }

    /// HTTP status code for remote failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
