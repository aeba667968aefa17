//! HTTP client for invoking named tools.

use reqwest::header::CONTENT_TYPE;

use crate::{
    error::{Error, Result},
    security::SecurityTools,
    sql::SqlTools,
    types::{Endpoint, ToolParams, ToolRequest, ToolResponse},
};

/// Sends one `{"tool", "params"}` request per call to a fixed endpoint.
///
/// The invoker holds no mutable state. Cloning it is cheap and clones share
/// the underlying HTTP client.
///
/// # Example
///
/// ```rust,no_run
/// use mcp_tool_client::{Endpoint, ToolInvoker, ToolParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let invoker = ToolInvoker::new(Endpoint::new("http://localhost:3001/mcp")?)?;
///
/// let mut params = ToolParams::new();
/// params.insert("message".into(), "Hello!".into());
/// let reply = invoker.invoke("echo", Some(params)).await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    endpoint: Endpoint,
    http: reqwest::Client,
}

impl ToolInvoker {
    /// Create a new invoker for `endpoint`.
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(Error::Client)?;
        Ok(Self { endpoint, http })
    }

    /// Create a new invoker with a custom reqwest client.
    pub fn with_client(endpoint: Endpoint, http: reqwest::Client) -> Self {
        Self { endpoint, http }
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Access the typed SQL Server tools.
    pub fn sql(&self) -> SqlTools<'_> {
        SqlTools::new(self)
    }

    /// Access the connection-string security tools.
    pub fn security(&self) -> SecurityTools<'_> {
        SecurityTools::new(self)
    }

    /// Invoke `tool` with `params`, or with `{}` when `params` is `None`.
    ///
    /// Returns the decoded JSON body on any 2xx status. A blank tool name
    /// fails with [`Error::InvalidTool`] without touching the network.
    pub async fn invoke(&self, tool: &str, params: Option<ToolParams>) -> Result<ToolResponse> {
        let request = ToolRequest::new(tool)?.with_params(params.unwrap_or_default());
        self.send(&request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: &ToolRequest) -> Result<ToolResponse> {
        let tool = request.tool();

        tracing::debug!(
            tool = %tool,
            endpoint = %self.endpoint.url(),
            param_count = request.params().len(),
            "Invoking tool"
        );

        let result = self.exchange(request).await;

        match &result {
            Ok(_) => tracing::debug!(tool = %tool, "Tool call succeeded"),
            Err(e) => tracing::error!(
                tool = %tool,
                status = e.status(),
                error = %e,
                "Error calling tool"
            ),
        }

        result
    }

    async fn exchange(&self, request: &ToolRequest) -> Result<ToolResponse> {
        let tool = request.tool();
        let body = serde_json::to_vec(request).map_err(|source| Error::Encode {
            tool: tool.to_string(),
            source,
        })?;

        let mut builder = self
            .http
            .post(self.endpoint.url().clone())
            .header(CONTENT_TYPE, self.endpoint.content_type())
            .body(body);
        if let Some(timeout) = self.endpoint.timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|source| {
            // A request that could not be built never reached the network.
            if source.is_builder() {
                Error::Client(source)
            } else {
                Error::Transport {
                    tool: tool.to_string(),
                    source,
                }
            }
        })?;

        Self::handle_response(tool, response).await
    }

    async fn handle_response(tool: &str, response: reqwest::Response) -> Result<ToolResponse> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(Error::Remote {
                tool: tool.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|source| Error::Transport {
            tool: tool.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            tool: tool.to_string(),
            source,
        })
    }
}
