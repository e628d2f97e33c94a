//! Shared utilities for integration tests.

use std::net::SocketAddr;

use slash_router::{Handler, HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;

pub const TOKEN: &str = "secret";

/// A slash router serving `handler` on an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn spawn(handler: impl Handler + 'static) -> Self {
        let server = HttpServer::new(ServerConfig::default(), handler).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            server.run(listener, rx).await.unwrap();
        });

        Self { addr, shutdown }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// HTTP client that never routes localhost traffic through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Post a slash command form and return the status and body.
pub async fn send(
    client: &reqwest::Client,
    url: &str,
    form: &[(&str, &str)],
) -> (reqwest::StatusCode, String) {
    let res = client.post(url).form(form).send().await.unwrap();
    let status = res.status();
    (status, res.text().await.unwrap())
}
