//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router serving one command per request
//! - Wire up middleware (tracing, timeout, request ID)
//! - Parse the command, run the handler, render the inline reply
//! - Switch the responder to delayed delivery once the request closes
//! - Observability (metrics, request IDs in command events)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::parse_command;
use crate::http::response::inline_reply;
use crate::observability::metrics;
use crate::reply::ReplyResponder;
use crate::routing::{Context, Handler};

const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn Handler>,
    /// Client used for delayed replies.
    pub client: reqwest::Client,
    pub max_body_size: usize,
}

/// HTTP server adapting a [`Handler`] to slash command webhooks.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, handler: impl Handler + 'static) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.callback_secs))
            .build()?;

        let state = AppState {
            handler: Arc::new(handler),
            client,
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/", any(command_handler))
            .route("/{*path}", any(command_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Flushes the responder when dropped, so replies switch to delayed delivery
/// even when the request future is cancelled (e.g. by the timeout layer).
struct FlushOnDrop(Arc<ReplyResponder>);

impl Drop for FlushOnDrop {
    fn drop(&mut self) {
        self.0.flush();
    }
}

/// Serve one slash command.
async fn command_handler(State(state): State<AppState>, request: Request<Body>) -> HttpResponse {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let command = match parse_command(request, state.max_body_size).await {
        Ok(command) => command,
        Err(err) => {
            tracing::warn!(request_id = %request_id, error = %err, "Malformed command request");
            metrics::record_command(err.kind(), start_time);
            return err.into_response();
        }
    };

    let name = command.command.clone();
    tracing::debug!(
        request_id = %request_id,
        command = %name,
        team = %command.team_domain,
        user = %command.user_name,
        "Serving command"
    );

    let responder = Arc::new(ReplyResponder::for_command(&command, state.client.clone()));
    let guard = FlushOnDrop(responder.clone());

    let result = state
        .handler
        .serve_command(Context::new(), responder.clone(), command)
        .await;

    // From here on, replies go to the response_url.
    let reply = responder.flush();
    drop(guard);

    match result {
        Ok(()) => {
            tracing::debug!(
                request_id = %request_id,
                command = %name,
                inline_reply = reply.is_some(),
                "Command served"
            );
            metrics::record_command("ok", start_time);
            match reply {
                Some(reply) => inline_reply(&reply),
                None => StatusCode::OK.into_response(),
            }
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                command = %name,
                kind = err.kind(),
                error = %err,
                "Command failed"
            );
            metrics::record_command(err.kind(), start_time);
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use tower::ServiceExt;

    use crate::error::SlashError;
    use crate::reply::{Responder, Response};
    use crate::routing::{handler_fn, Mux};
    use crate::command::Command;

    fn weather_server() -> HttpServer {
        let mut mux = Mux::with_token("secret");
        mux.command("/weather", handler_fn(
            |_ctx: Context, responder: Arc<dyn Responder>, _command: Command| async move {
                responder.respond(Response::reply("cold")).await
            },
        ));
        mux.command("/deploy", handler_fn(
            |_ctx: Context, responder: Arc<dyn Responder>, _command: Command| async move {
                responder.respond(Response::say("deployed!")).await
            },
        ));
        mux.command("/silent", handler_fn(
            |_ctx: Context, _responder: Arc<dyn Responder>, _command: Command| async move {
                Ok::<_, SlashError>(())
            },
        ));
        mux.command("/twice", handler_fn(
            |_ctx: Context, responder: Arc<dyn Responder>, _command: Command| async move {
                responder.respond(Response::reply("first")).await?;
                responder.respond(Response::reply("second")).await
            },
        ));
        mux.command("/boom", handler_fn(
            |_ctx: Context, _responder: Arc<dyn Responder>, _command: Command| async move {
                Err::<(), _>(SlashError::handler("boom"))
            },
        ));

        HttpServer::new(ServerConfig::default(), mux).unwrap()
    }

    async fn post(server: &HttpServer, form: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        let res = server.router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_private_reply() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fweather&token=secret&text=94107").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{\"text\":\"cold\"}\n");
    }

    #[tokio::test]
    async fn test_broadcast_reply() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fdeploy&token=secret").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{\"response_type\":\"in_channel\",\"text\":\"deployed!\"}\n");
    }

    #[tokio::test]
    async fn test_bad_token() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fweather&token=bad&text=94107").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains(&SlashError::Unauthorized.to_string()));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Funknown&token=secret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains(&SlashError::NoHandler.to_string()));
    }

    #[tokio::test]
    async fn test_handler_error() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fboom&token=secret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "boom\n");
    }

    #[tokio::test]
    async fn test_no_reply_is_empty_ok() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fsilent&token=secret").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_second_inline_reply_fails_the_command() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Ftwice&token=secret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("only reply once"));
    }

    #[tokio::test]
    async fn test_malformed_request_rejected_before_routing() {
        let server = weather_server();
        let (status, body) =
            post(&server, "command=%2Fweather&token=secret&response_url=%3Abad").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("malformed request"));
    }

    #[tokio::test]
    async fn test_broken_escape_never_reaches_handler() {
        let server = weather_server();
        let (status, body) = post(&server, "command=%2Fweather&token=secret&text=%zz").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid URL escape"));
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let server = weather_server();
        let req = Request::builder()
            .method("POST")
            .uri("/commands")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(X_REQUEST_ID, "req-42")
            .body(Body::from("command=%2Fweather&token=secret"))
            .unwrap();

        let res = server.router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[X_REQUEST_ID], "req-42");
    }
}
