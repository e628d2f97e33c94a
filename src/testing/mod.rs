//! Helpers for testing slash command handlers.
//!
//! `ResponseRecorder` stands in for the delayed responder;
//! `RecordingServer` serves one over HTTP so it can be used as a real
//! `response_url`.

pub mod recorder;

pub use recorder::{RecordingServer, ResponseRecorder};
