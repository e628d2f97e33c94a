//! The handler contract.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::command::Command;
use crate::error::SlashError;
use crate::reply::Responder;
use crate::routing::context::Context;

/// Something that handles a slash command.
///
/// Replies go through `responder`. The first reply sent before this returns
/// becomes the inline HTTP response; later replies travel to the command's
/// `response_url`. The responder is reference counted so it can be moved into
/// background tasks that reply after the handler has returned.
///
/// A returned error is shown to the user as the response body.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        command: Command,
    ) -> Result<(), SlashError>;
}

#[async_trait]
impl<H> Handler for Arc<H>
where
    H: Handler + ?Sized,
{
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        command: Command,
    ) -> Result<(), SlashError> {
        (**self).serve_command(ctx, responder, command).await
    }
}

/// Adapts an async closure into a [`Handler`]. Built with [`handler_fn`].
pub struct HandlerFn<F, Fut> {
    f: F,
    _future: PhantomData<fn() -> Fut>,
}

/// Wrap `f` so it can be registered as a handler.
///
/// ```no_run
/// use slash_router::{handler_fn, Responder, Response};
///
/// let ping = handler_fn(|_ctx, responder, _command| async move {
///     responder.respond(Response::reply("pong")).await
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F, Fut>
where
    F: Fn(Context, Arc<dyn Responder>, Command) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SlashError>> + Send,
{
    HandlerFn {
        f,
        _future: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F, Fut>
where
    F: Fn(Context, Arc<dyn Responder>, Command) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SlashError>> + Send,
{
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        command: Command,
    ) -> Result<(), SlashError> {
        (self.f)(ctx, responder, command).await
    }
}
