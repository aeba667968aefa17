use crate::types::Endpoint;
use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:3001/mcp";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Tool endpoint URL
    #[arg(long, env = "MCP_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, env = "MCP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the example sequence against the SQL Server tools
    Demo,
    /// Invoke a single tool and print its reply
    Call {
        /// Tool name
        tool: String,
        /// Parameters as a JSON object
        #[arg(short, long)]
        params: Option<String>,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub url: String,
    pub content_type: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `MCP_CLIENT_*` env vars and CLI flags.
    ///
    /// Priority: CLI flag > CLI env var > `MCP_CLIENT_` env var > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("endpoint.url", DEFAULT_ENDPOINT_URL)?
            .set_default("endpoint.content_type", crate::types::JSON_CONTENT_TYPE)?;

        // An explicit file must exist; ./config.* is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. MCP_CLIENT_ENDPOINT__URL=http://db-host:3001/mcp
        builder = builder.add_source(
            Environment::with_prefix("MCP_CLIENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = &cli.endpoint {
            builder = builder.set_override("endpoint.url", url.as_str())?;
        }
        if let Some(secs) = cli.timeout_secs {
            builder = builder.set_override("endpoint.timeout_secs", secs)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Validate the endpoint settings.
    pub fn endpoint(&self) -> Result<Endpoint, config::ConfigError> {
        let settings = &self.endpoint;

        let mut endpoint = Endpoint::new(&settings.url)
            .map_err(|e| config::ConfigError::Message(format!("endpoint.url: {e}")))?
            .with_content_type(settings.content_type.trim())
            .map_err(|e| config::ConfigError::Message(format!("endpoint.content_type: {e}")))?;

        match settings.timeout_secs {
            Some(0) => {
                return Err(config::ConfigError::Message(
                    "endpoint.timeout_secs must be greater than zero".to_string(),
                ));
            }
            Some(secs) => endpoint = endpoint.with_timeout(Duration::from_secs(secs)),
            None => {}
        }

        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str, timeout_secs: Option<u64>) -> ClientConfig {
        ClientConfig {
            endpoint: EndpointConfig {
                url: url.to_string(),
                content_type: "application/json".to_string(),
                timeout_secs,
            },
        }
    }

    #[test]
    fn test_endpoint_with_timeout() {
        let endpoint = settings("http://localhost:3001/mcp", Some(5))
            .endpoint()
            .unwrap();
        assert_eq!(endpoint.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(settings("http://localhost:3001/mcp", Some(0)).endpoint().is_err());
    }

    #[test]
    fn test_bad_url_rejected() {
        assert!(settings("not a url", None).endpoint().is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        assert!(settings("ftp://127.0.0.1/mcp", None).endpoint().is_err());
    }

    #[test]
    fn test_invalid_content_type_rejected() {
        let mut config = settings("http://localhost:3001/mcp", None);
        config.endpoint.content_type = "application/json\u{7f}".to_string();
        assert!(config.endpoint().is_err());

        config.endpoint.content_type = "   ".to_string();
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn test_parse_call_command() {
        let cli = Cli::try_parse_from([
            "mcp-tool-client",
            "call",
            "echo",
            "--params",
            r#"{"message":"x"}"#,
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Call {
                tool: "echo".to_string(),
                params: Some(r#"{"message":"x"}"#.to_string()),
            })
        );
    }
}
