//! Named-tool RPC client CLI
//!
//! Runs the SQL Server example sequence, or invokes a single tool.

use anyhow::{Context, bail};
use clap::Parser;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing::info;

use mcp_tool_client::{
    ToolInvoker, ToolParams,
    config::{Cli, ClientConfig, Command},
    sql::DEFAULT_CONNECTION,
    telemetry,
};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    telemetry::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_cli(&cli).context("Configuration error")?;
    let endpoint = config.endpoint().context("Configuration error")?;

    info!(
        name: "client.config.loaded",
        endpoint = %endpoint.url(),
        timeout = ?endpoint.timeout(),
        "Client configuration loaded"
    );

    let invoker = ToolInvoker::new(endpoint)?;

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            if let Err(e) = run_demo(&invoker).await {
                println!("Example failed: {e}");
            }
        }
        Command::Call { tool, params } => {
            let params = params.as_deref().map(parse_params).transpose()?;
            let reply = invoker.invoke(&tool, params).await?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
    }

    Ok(())
}

async fn run_demo(invoker: &ToolInvoker) -> mcp_tool_client::Result<()> {
    let sql = invoker.sql();

    println!("Initializing SQL Server connection...");
    let init = sql.initialize(DEFAULT_CONNECTION).await?;
    println!("Initialization result: {init}");

    println!("\nTesting echo functionality...");
    let echo = sql.echo("Hello from Rust!").await?;
    println!("Echo result: {echo}");

    println!("\nRetrieving database metadata...");
    let tables = sql.table_metadata(DEFAULT_CONNECTION, None).await?;
    println!("Database has {} tables", tables.len());

    println!("\nExecuting SQL query...");
    let rows = sql
        .execute_query("SELECT TOP 5 * FROM sys.tables", DEFAULT_CONNECTION)
        .await?;
    println!(
        "Query result: {}",
        serde_json::Value::Array(rows.into_iter().map(serde_json::Value::Object).collect())
    );

    println!("\nExample completed successfully!");
    Ok(())
}

fn parse_params(raw: &str) -> anyhow::Result<ToolParams> {
    match serde_json::from_str(raw).context("--params must be valid JSON")? {
        serde_json::Value::Object(params) => Ok(params),
        other => bail!("--params must be a JSON object, got: {other}"),
    }
}
