//! Giphy MCP server - stdio entry point

use clap::Parser;
use giphy_mcp::config::{GiphyConfig, API_KEY_ENV, SIGNUP_URL};
use giphy_mcp::observability::init_default_logging;
use giphy_mcp::server::GiphyServer;
use rmcp::{transport::stdio, ServiceExt};
use std::process;
use tokio::signal;
use tracing::{error, info, warn};

/// MCP server exposing Giphy search over stdio
#[derive(Parser)]
#[command(name = "giphy-mcp")]
#[command(about = "MCP server exposing Giphy GIF and sticker search")]
#[command(version)]
struct Cli {
    /// Upstream origin (defaults to https://api.giphy.com)
    #[arg(long, env = "GIPHY_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging(cli.verbose);

    info!("Starting giphy-mcp v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        error!("Fatal: {}", e);
        process::exit(1);
    }

    info!("Server shutdown complete");
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GiphyConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    if config.api_key.resolve().is_err() {
        warn!(
            "{} is not set; tool calls will fail until it is provided ({})",
            API_KEY_ENV, SIGNUP_URL
        );
    }

    let server = GiphyServer::from_config(&config)?;
    info!(
        base_url = %config.base_url,
        min_interval_ms = config.min_interval.as_millis() as u64,
        tools = server.tool_system().list_tools().len(),
        "Serving MCP over stdio"
    );

    let service = server.serve(stdio()).await?;
    let cancel = service.cancellation_token();

    tokio::select! {
        quit = service.waiting() => {
            info!("Client disconnected: {:?}", quit?);
        }
        reason = shutdown_signal() => {
            info!("Received {}, shutting down", reason);
            cancel.cancel();
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            let _ = signal::ctrl_c().await;
            return "SIGINT";
        }
    };

    tokio::select! {
        _ = signal::ctrl_c() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    let _ = signal::ctrl_c().await;
    "Ctrl-C"
}
