//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP adaptor and delayed replies produce:
//!     → logging.rs (subscriber setup for structured events)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the HTTP layer into every command event
//! - Metrics are cheap; recording without an installed exporter is a no-op
//! - Core routing code returns errors and leaves logging to the adaptor

pub mod logging;
pub mod metrics;
