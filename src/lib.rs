//! Named-tool RPC client
//!
//! A small HTTP client for endpoints that expose remote operations as
//! "call a named tool with a parameter bag": every call is a single
//! `POST` of `{"tool": "...", "params": {...}}` answered with arbitrary JSON.
//!
//! # Architecture
//!
//! - **Invoker**: one request per call, no retries, untyped JSON reply
//! - **SQL tools**: typed wrappers for the SQL Server tool set, layered on
//!   the invoker
//! - **Security tools**: key rotation and generation for stored connection
//!   strings
//! - **Config**: defaults, config file, environment and CLI layered into a
//!   single endpoint
//!
//! # Modules
//!
//! - [`client`]: the [`ToolInvoker`]
//! - [`types`]: requests, replies and the [`Endpoint`]
//! - [`error`]: the error taxonomy
//! - [`sql`]: typed SQL Server tools and metadata models
//! - [`security`]: typed security tools
//! - [`config`]: configuration loading
//! - [`telemetry`]: logging setup
//!
//! ```rust,no_run
//! use mcp_tool_client::{Endpoint, ToolInvoker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let invoker = ToolInvoker::new(Endpoint::new("http://localhost:3001/mcp")?)?;
//!
//!     let init = invoker.invoke("initialize", None).await?;
//!     println!("Initialization result: {init}");
//!
//!     let tables = invoker.sql().table_metadata("DefaultConnection", None).await?;
//!     println!("Database has {} tables", tables.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod security;
pub mod sql;
pub mod telemetry;
pub mod types;

// Re-exports
pub use client::ToolInvoker;
pub use error::{Error, Result};
pub use types::{Endpoint, ToolParams, ToolRequest, ToolResponse};
