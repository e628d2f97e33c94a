//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Command (token field)
//!     → auth.rs (compare with the configured secret)
//!     → match: forward to the wrapped handler
//!     → mismatch: Unauthorized, wrapped handler never runs
//! ```
//!
//! # Design Decisions
//! - Exact string comparison, no trimming or case folding
//! - Authorization is a handler wrapper, so it composes with any route

pub mod auth;

pub use auth::{authorize, Authorize};
