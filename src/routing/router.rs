//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route whose matcher accepts a command
//! - Inject the matched parameters and call the route's handler
//!
//! # Design Decisions
//! - Registration happens during setup; dispatch only reads (`&self`)
//! - O(n) scan over routes, no caching
//! - First registered, first matched
//! - Explicit `NoHandler` rather than a silent default
//! - A `Mux` is itself a `Handler`, so muxes nest

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;

use crate::command::Command;
use crate::error::SlashError;
use crate::reply::Responder;
use crate::routing::context::{Context, Params};
use crate::routing::handler::Handler;
use crate::routing::matcher::{AndMatcher, CommandMatcher, Matcher, TextMatcher};
use crate::security::Authorize;

/// A handler paired with the conditions that select it.
pub struct Route {
    matcher: AndMatcher,
    handler: Box<dyn Handler>,
}

impl Route {
    pub fn new(matcher: impl Matcher + 'static, handler: impl Handler + 'static) -> Self {
        let mut all = AndMatcher::default();
        all.push(matcher);
        Self {
            matcher: all,
            handler: Box::new(handler),
        }
    }

    /// Refine the route with an extra condition that must also match.
    ///
    /// ```no_run
    /// use slash_router::{handler_fn, Mux, SlashError, TextMatcher};
    ///
    /// let mut mux = Mux::with_token("secret");
    /// mux.command("/deploy", handler_fn(|_, _, _| async { Ok::<_, SlashError>(()) }))
    ///     .and(TextMatcher::parse(r"(?P<repo>\S+) to (?P<env>\S+)").unwrap());
    /// ```
    pub fn and(&mut self, matcher: impl Matcher + 'static) -> &mut Self {
        self.matcher.push(matcher);
        self
    }

    /// Evaluate this route's conditions.
    pub fn matches(&self, command: &Command) -> Option<Params> {
        self.matcher.matches(command)
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

/// Routes commands to handlers.
#[derive(Default)]
pub struct Mux {
    routes: Vec<Route>,
    token: String,
}

impl Mux {
    /// A mux with an empty shared secret: `command` routes only accept
    /// commands whose token is empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mux whose `command` routes require `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            token: token.into(),
        }
    }

    /// Add a route selected by `matcher`.
    pub fn route(
        &mut self,
        matcher: impl Matcher + 'static,
        handler: impl Handler + 'static,
    ) -> &mut Route {
        self.add_route(Route::new(matcher, handler))
    }

    /// Add a route for the command `name`, gated by the mux token.
    ///
    /// ```no_run
    /// use slash_router::{handler_fn, Mux, Response};
    ///
    /// let mut mux = Mux::with_token("secret");
    /// mux.command("/weather", handler_fn(|_ctx, responder, _command| async move {
    ///     responder.respond(Response::reply("cold")).await
    /// }));
    /// ```
    pub fn command(&mut self, name: &str, handler: impl Handler + 'static) -> &mut Route {
        let handler = Authorize::new(handler, self.token.clone());
        self.route(CommandMatcher::new(name), handler)
    }

    /// Add a route matching the command text. Named capture groups become
    /// route parameters.
    pub fn match_text(&mut self, pattern: Regex, handler: impl Handler + 'static) -> &mut Route {
        self.route(TextMatcher::new(pattern), handler)
    }

    fn add_route(&mut self, route: Route) -> &mut Route {
        self.routes.push(route);
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }

    /// Find the handler for `command`, with the parameters its route extracted.
    pub fn resolve(&self, command: &Command) -> Option<(&dyn Handler, Params)> {
        self.routes.iter().find_map(|route| {
            route
                .matches(command)
                .map(|params| (route.handler(), params))
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("conditions", &self.matcher.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Mux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Handlers are opaque and the token is a secret.
        f.debug_struct("Mux")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for Mux {
    async fn serve_command(
        &self,
        ctx: Context,
        responder: Arc<dyn Responder>,
        command: Command,
    ) -> Result<(), SlashError> {
        let (handler, params) = self.resolve(&command).ok_or(SlashError::NoHandler)?;
        tracing::trace!(command = %command.command, params = ?params, "Route matched");
        handler
            .serve_command(ctx.with_params(params), responder, command)
            .await
    }
}
