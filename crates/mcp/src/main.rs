//! Splunk MCP server binary.
//!
//! Responsibilities:
//! - Parse command-line arguments and set up logging on stderr.
//! - Load `.env` and `SPLUNK_*` settings, then connect once to Splunk.
//! - Serve MCP over stdin/stdout until EOF or Ctrl+C.
//!
//! Does NOT handle:
//! - Tool behavior (see `splunk_mcp::handlers`).
//!
//! Invariants:
//! - Nothing but protocol messages is ever written to stdout.
//! - Configuration and authentication failures abort startup with a non-zero exit code.
//!
//! # Usage
//!
//! ```bash
//! SPLUNK_HOST=splunk.example.com SPLUNK_TOKEN=... splunk-mcp
//! splunk-mcp --env-file /etc/splunk-mcp.env --log-level debug
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use splunk_client::{CancellationToken, SplunkClient};
use splunk_config::{Config, ConfigLoader};
use splunk_mcp::McpServer;
use splunk_mcp::exit_code::{ExitCode, ExitCodeExt};
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "splunk-mcp")]
#[command(version)]
#[command(about = "Splunk Model Context Protocol (MCP) server")]
struct Cli {
    /// Dotenv file to load instead of `./.env`
    #[arg(long, env = "SPLUNK_MCP_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Log filter (e.g. `info`, `debug`, `splunk_client=trace`); overrides RUST_LOG
    #[arg(long, env = "SPLUNK_MCP_LOG_LEVEL")]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path.clone());
    }
    let config = loader.load_dotenv()?.from_env()?.build()?;
    Ok(config)
}

async fn run(cli: Cli, shutdown: CancellationToken) -> anyhow::Result<()> {
    let config = load_config(&cli).context("Failed to load Splunk configuration")?;
    tracing::info!(base_url = %config.connection.base_url(), "Loaded Splunk configuration");

    let mut client = SplunkClient::new(config);
    tokio::select! {
        connected = client.connect() => connected.context("Failed to connect to Splunk")?,
        _ = shutdown.cancelled() => {
            anyhow::bail!(splunk_client::ClientError::Cancelled);
        }
    }

    McpServer::new(client)
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), shutdown)
        .await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        tracing::info!("Received Ctrl+C, shutting down");
        signal.cancel();
    });

    let exit_code = match run(cli, shutdown).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::error!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
