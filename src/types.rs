//! Request, response and endpoint types for the tool protocol.
//!
//! A request is a tool name plus a parameter bag, sent as
//! `{"tool": "...", "params": {...}}`. The response is whatever JSON the
//! endpoint returns; interpreting it is left to the caller.

use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Parameter bag for a tool call.
pub type ToolParams = serde_json::Map<String, serde_json::Value>;

/// Untyped reply from a tool.
pub type ToolResponse = serde_json::Value;

/// Content type sent with every request unless the endpoint overrides it.
pub const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// Request
// =============================================================================

/// A single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRequest {
    tool: String,
    params: ToolParams,
}

impl ToolRequest {
    /// Create a request with no parameters.
    ///
    /// Fails with [`Error::InvalidTool`] if `tool` is empty or blank.
    pub fn new(tool: impl Into<String>) -> Result<Self> {
        let tool = tool.into();
        if tool.trim().is_empty() {
            return Err(Error::InvalidTool);
        }
        Ok(Self {
            tool,
            params: ToolParams::new(),
        })
    }

    /// Replace the parameter bag.
    #[must_use]
    pub fn with_params(mut self, params: ToolParams) -> Self {
        self.params = params;
        self
    }

    /// Add a single parameter.
    #[must_use]
    pub fn with_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Name of the tool being invoked.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Parameters sent with the call.
    pub fn params(&self) -> &ToolParams {
        &self.params
    }
}

// =============================================================================
// Endpoint
// =============================================================================

/// Where and how requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    content_type: String,
    timeout: Option<Duration>,
}

impl Endpoint {
    /// Create an endpoint with the JSON content type and no timeout.
    ///
    /// Only `http` and `https` URLs are accepted.
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(Self {
            url,
            content_type: JSON_CONTENT_TYPE.to_string(),
            timeout: None,
        })
    }

    /// Override the `Content-Type` header.
    ///
    /// Fails with [`Error::InvalidContentType`] if the value is blank or
    /// cannot be sent as a header.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Result<Self> {
        let content_type = content_type.into();
        if content_type.trim().is_empty() || HeaderValue::from_str(&content_type).is_err() {
            return Err(Error::InvalidContentType(content_type));
        }
        self.content_type = content_type;
        Ok(self)
    }

    /// Bound each call by a total timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `Content-Type` header value.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Per-call timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
