//! The responder contract and the per-request reply state machine.
//!
//! # Responsibilities
//! - Capture at most one inline reply while the HTTP request is open
//! - Switch once, and for good, to delayed delivery when the request closes
//! - Forward every later reply to the delayed responder
//!
//! # Design Decisions
//! - One mutex guards the mode and the captured reply
//! - The lock is never held across the delayed responder's I/O
//! - Taking the inline reply and switching mode is a single step, so a reply
//!   racing with the flush is either rendered inline or delivered later,
//!   never lost

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::command::Command;
use crate::error::SlashError;
use crate::reply::callback::CallbackResponder;
use crate::reply::response::Response;

/// Something that can send replies.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, response: Response) -> Result<(), SlashError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Inside the inline window: hold the first reply.
    Capturing,
    /// The inline response was rendered: forward to the delayed responder.
    Flushed,
}

#[derive(Debug)]
struct ReplyState {
    mode: Mode,
    reply: Option<Response>,
}

/// Responder handed to handlers for one inbound request.
///
/// While capturing, the first reply is held for the HTTP adaptor and a second
/// one fails with [`SlashError::AlreadyReplied`]. After [`flush`](Self::flush),
/// every reply goes to the delayed responder.
pub struct ReplyResponder {
    state: Mutex<ReplyState>,
    delayed: Arc<dyn Responder>,
}

impl ReplyResponder {
    pub fn new(delayed: Arc<dyn Responder>) -> Self {
        Self {
            state: Mutex::new(ReplyState {
                mode: Mode::Capturing,
                reply: None,
            }),
            delayed,
        }
    }

    /// Responder for `command`, posting delayed replies to its `response_url`.
    pub fn for_command(command: &Command, client: reqwest::Client) -> Self {
        Self::new(Arc::new(CallbackResponder::new(
            command.response_url.clone(),
            client,
        )))
    }

    /// Take the captured inline reply and switch to delayed delivery.
    ///
    /// Returns the reply the first time it is called; afterwards `None`.
    pub fn flush(&self) -> Option<Response> {
        let mut state = self.lock();
        state.mode = Mode::Flushed;
        state.reply.take()
    }

    pub fn is_flushed(&self) -> bool {
        self.lock().mode == Mode::Flushed
    }

    fn lock(&self) -> MutexGuard<'_, ReplyState> {
        // The state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Responder for ReplyResponder {
    async fn respond(&self, response: Response) -> Result<(), SlashError> {
        {
            let mut state = self.lock();
            if state.mode == Mode::Capturing {
                if state.reply.is_some() {
                    return Err(SlashError::AlreadyReplied);
                }
                state.reply = Some(response);
                return Ok(());
            }
        }

        self.delayed.respond(response).await
    }
}
