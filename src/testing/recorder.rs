//! Recording responder and a local `response_url` endpoint.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::any, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use url::Url;

use crate::error::SlashError;
use crate::reply::{Responder, Response, MAX_DELAYED_RESPONSES};

/// A [`Responder`] that records replies for assertions.
///
/// Mirrors the platform's ceiling on delayed replies: it accepts at most
/// `capacity` replies in total and fails the rest with
/// [`SlashError::TooManyResponses`].
pub struct ResponseRecorder {
    capacity: usize,
    accepted: AtomicUsize,
    tx: mpsc::Sender<Response>,
    rx: Mutex<mpsc::Receiver<Response>>,
}

impl ResponseRecorder {
    /// A recorder accepting [`MAX_DELAYED_RESPONSES`] replies.
    pub fn new() -> Self {
        Self::with_capacity(MAX_DELAYED_RESPONSES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            capacity,
            accepted: AtomicUsize::new(0),
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Wait for the next recorded reply.
    pub async fn next(&self) -> Option<Response> {
        self.rx.lock().await.recv().await
    }

    /// The next recorded reply, if one is already waiting.
    pub fn try_next(&self) -> Option<Response> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    /// Replies accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    fn add(&self, response: Response) -> Result<(), SlashError> {
        let capacity = self.capacity;
        self.accepted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < capacity).then_some(n + 1)
            })
            .map_err(|_| SlashError::TooManyResponses { max: capacity })?;

        // Never full: the channel holds `capacity` slots and at most
        // `capacity` replies are ever accepted.
        self.tx
            .try_send(response)
            .map_err(|_| SlashError::TooManyResponses { max: capacity })
    }
}

impl Default for ResponseRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for ResponseRecorder {
    async fn respond(&self, response: Response) -> Result<(), SlashError> {
        self.add(response)
    }
}

async fn record(
    State(recorder): State<Arc<ResponseRecorder>>,
    Json(response): Json<Response>,
) -> impl IntoResponse {
    match recorder.add(response) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

/// A [`ResponseRecorder`] served over HTTP on an ephemeral localhost port.
///
/// Use [`url`](Self::url) as a command's `response_url`; every JSON reply
/// posted there is recorded. The server stops when this value is dropped.
pub struct RecordingServer {
    recorder: Arc<ResponseRecorder>,
    addr: SocketAddr,
    url: Url,
    task: JoinHandle<()>,
}

impl RecordingServer {
    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(ResponseRecorder::new()).await
    }

    pub async fn spawn_with(recorder: ResponseRecorder) -> std::io::Result<Self> {
        let recorder = Arc::new(recorder);
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let url = Url::parse(&format!("http://{addr}/")).map_err(std::io::Error::other)?;

        let app = Router::new()
            .route("/", any(record))
            .route("/{*path}", any(record))
            .with_state(recorder.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Recording server failed");
            }
        });

        Ok(Self {
            recorder,
            addr,
            url,
            task,
        })
    }

    pub fn recorder(&self) -> &ResponseRecorder {
        &self.recorder
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> Url {
        self.url.clone()
    }
}

impl Drop for RecordingServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
