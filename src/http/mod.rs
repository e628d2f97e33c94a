//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Webhook POST (form-encoded)
//!     → server.rs (Axum setup, request ID, timeout)
//!     → request.rs (form pairs → Command, malformed input → 400)
//!     → Handler::serve_command with a ReplyResponder
//!     → response.rs (inline reply as JSON, errors as 400 text)
//!     → ReplyResponder flushed: later replies go to response_url
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::parse_command;
pub use response::inline_reply;
pub use server::{AppState, HttpServer};
