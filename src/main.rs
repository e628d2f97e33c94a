//! Slash command server.
//!
//! Serves the commands listed in the configuration file until Ctrl+C or
//! SIGTERM.

use std::path::PathBuf;

use clap::Parser;

use slash_router::config::{load_config, ServerConfig};
use slash_router::lifecycle::{signals, startup, Shutdown};
use slash_router::observability::logging;

#[derive(Parser)]
#[command(name = "slash-router")]
#[command(about = "Serve chat slash command webhooks", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        commands = config.commands.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
