//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the command mux from configuration
//! - Initialize subsystems in dependency order (metrics, HTTP server)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::command::Command;
use crate::config::{CommandConfig, ConfigError, ServerConfig, ValidationError};
use crate::error::SlashError;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::reply::{Responder, Response};
use crate::routing::{Context, Handler, Mux, TextMatcher};

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid metrics address '{address}': {source}")]
    MetricsAddress {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("Metrics setup failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Replies with configured text, filling `{param}` placeholders from the
/// route parameters.
#[derive(Debug, Clone)]
pub struct StaticReply {
    text: String,
    in_channel: bool,
}

impl StaticReply {
    pub fn new(text: impl Into<String>, in_channel: bool) -> Self {
        Self {
            text: text.into(),
            in_channel,
        }
    }

    fn render(&self, ctx: &Context) -> String {
        ctx.params()
            .iter()
            .fold(self.text.clone(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

impl From<&CommandConfig> for StaticReply {
    fn from(config: &CommandConfig) -> Self {
        Self::new(config.reply.clone(), config.in_channel)
    }
}

#[async_trait]
impl Handler for StaticReply {
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        _command: Command,
    ) -> Result<(), SlashError> {
        let response = Response {
            text: self.render(&ctx),
            in_channel: self.in_channel,
        };
        responder.respond(response).await
    }
}

/// Build the mux serving `config.commands`, in file order, gated by
/// `security.token`.
pub fn build_mux(config: &ServerConfig) -> Result<Mux, ConfigError> {
    let mut mux = Mux::with_token(config.security.token.clone());

    for (i, command) in config.commands.iter().enumerate() {
        let route = mux.command(&command.name, StaticReply::from(command));

        if let Some(pattern) = &command.pattern {
            let matcher = TextMatcher::parse(pattern).map_err(|e| {
                ConfigError::Validation(vec![ValidationError {
                    field: format!("commands[{i}].pattern"),
                    message: e.to_string(),
                }])
            })?;
            route.and(matcher);
        }
    }

    tracing::debug!(routes = mux.len(), "Command routes registered");
    Ok(mux)
}

/// Serve `config` until `shutdown` triggers.
pub async fn run(config: ServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr = address
            .parse()
            .map_err(|source| StartupError::MetricsAddress {
                address: address.clone(),
                source,
            })?;
        metrics::init_metrics(addr)?;
    }

    let mux = build_mux(&config)?;
    let server = HttpServer::new(config, mux)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for commands");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
