//! Slash command dispatcher.
//!
//! Receives chat-platform slash command webhooks, routes each command to a
//! handler through an ordered [`Mux`], and manages the reply protocol: one
//! inline reply inside the HTTP request, any further replies posted to the
//! command's `response_url`.
//!
//! ```no_run
//! use slash_router::{handler_fn, HttpServer, Mux, Responder, Response, ServerConfig};
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mux = Mux::with_token("secret");
//! mux.command("/weather", handler_fn(|_ctx, responder, _command| async move {
//!     responder.respond(Response::reply("cold")).await
//! }));
//!
//! let server = HttpServer::new(ServerConfig::default(), mux)?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! let shutdown = slash_router::Shutdown::new();
//! server.run(listener, shutdown.subscribe()).await?;
//! # Ok(())
//! # }
//! ```

// Core
pub mod command;
pub mod error;
pub mod reply;
pub mod routing;
pub mod security;

// Serving
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

// Test support
pub mod testing;

pub use command::Command;
pub use config::ServerConfig;
pub use error::SlashError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use reply::{CallbackResponder, ReplyResponder, Responder, Response, MAX_DELAYED_RESPONSES};
pub use routing::{
    handler_fn, CommandMatcher, Context, Handler, Matcher, Mux, Params, Route, TextMatcher,
};
pub use security::{authorize, Authorize};
