//! Shared-secret authorization for handlers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::command::Command;
use crate::error::SlashError;
use crate::reply::Responder;
use crate::routing::{Context, Handler};

/// Wraps a handler and rejects commands whose token differs from the secret.
///
/// On mismatch the inner handler is never called and the responder is left
/// untouched.
pub struct Authorize<H> {
    inner: H,
    token: String,
}

impl<H> Authorize<H> {
    pub fn new(inner: H, token: impl Into<String>) -> Self {
        Self {
            inner,
            token: token.into(),
        }
    }
}

/// Gate `handler` behind `token`.
pub fn authorize<H: Handler>(handler: H, token: impl Into<String>) -> Authorize<H> {
    Authorize::new(handler, token)
}

#[async_trait]
impl<H: Handler> Handler for Authorize<H> {
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        command: Command,
    ) -> Result<(), SlashError> {
        if command.token != self.token {
            return Err(SlashError::Unauthorized);
        }
        self.inner.serve_command(ctx, responder, command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::reply::Response;
    use crate::routing::handler_fn;
    use crate::testing::ResponseRecorder;

    fn counting(calls: Arc<AtomicUsize>) -> impl Handler {
        handler_fn(move |_ctx: Context, responder: Arc<dyn Responder>, command: Command| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if command.text == "fail" {
                    return Err(SlashError::handler("boom"));
                }
                responder.respond(Response::reply("ok")).await
            }
        })
    }

    fn with_token(token: &str, text: &str) -> Command {
        Command {
            token: token.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = authorize(counting(calls.clone()), "secret");
        let recorder = Arc::new(ResponseRecorder::new());

        let err = handler
            .serve_command(Context::new(), recorder.clone(), with_token("wrong", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, SlashError::Unauthorized));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(recorder.try_next().is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = authorize(counting(calls.clone()), "secret");
        let recorder = Arc::new(ResponseRecorder::new());

        let result = handler
            .serve_command(Context::new(), recorder, Command::default())
            .await;
        assert!(matches!(result, Err(SlashError::Unauthorized)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_matching_token_forwards() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = authorize(counting(calls.clone()), "secret");
        let recorder = Arc::new(ResponseRecorder::new());

        handler
            .serve_command(Context::new(), recorder.clone(), with_token("secret", ""))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.try_next().unwrap().text, "ok");

        // The inner handler's result comes back unchanged.
        let err = handler
            .serve_command(Context::new(), recorder, with_token("secret", "fail"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
