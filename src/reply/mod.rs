//! Reply protocol subsystem.
//!
//! # Data Flow
//! ```text
//! Handler calls Responder::respond(Response)
//!     → responder.rs (ReplyResponder)
//!         Capturing: keep the first reply, reject a second one
//!         Flushed:   forward to the delayed responder
//!     → callback.rs (POST JSON to the command's response_url)
//!
//! HTTP adaptor, after the handler returns:
//!     ReplyResponder::flush → inline reply (if any) rendered as the body
//! ```
//!
//! # Design Decisions
//! - Exactly one inline reply per request; everything else is delayed
//! - Delayed delivery is attempted once, no retries
//! - Handlers reply the same way whether or not the request is still open

pub mod callback;
pub mod responder;
pub mod response;

pub use callback::CallbackResponder;
pub use responder::{ReplyResponder, Responder};
pub use response::Response;

/// Delayed replies the platform accepts for one command invocation.
pub const MAX_DELAYED_RESPONSES: usize = 5;
