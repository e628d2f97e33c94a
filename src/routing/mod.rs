//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Command (command name, text)
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (evaluate match conditions, extract named groups)
//!     → context.rs (merge parameters into the request context)
//!     → handler.rs (run the matched handler)
//!     → Return: handler result, or NoHandler
//!
//! Route registration (at startup):
//!     Mux::command / Mux::match_text / Mux::route
//!     → Route (AND of matchers, refinable with Route::and)
//!     → Mux shared read-only while serving
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, read-only while serving
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod context;
pub mod handler;
pub mod matcher;
pub mod router;

pub use context::{Context, Params};
pub use handler::{handler_fn, Handler, HandlerFn};
pub use matcher::{AndMatcher, CommandMatcher, Matcher, TextMatcher};
pub use router::{Mux, Route};
