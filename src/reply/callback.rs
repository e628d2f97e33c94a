//! Delayed replies posted to the command's `response_url`.

use async_trait::async_trait;
use url::Url;

use crate::error::SlashError;
use crate::observability::metrics;
use crate::reply::responder::Responder;
use crate::reply::response::Response;

/// Posts each reply as JSON to the `response_url` of a command.
///
/// Every call makes exactly one attempt; failures are returned to the caller.
/// Without a `response_url` every call fails with [`SlashError::NoResponseUrl`].
#[derive(Debug, Clone)]
pub struct CallbackResponder {
    response_url: Option<Url>,
    client: reqwest::Client,
}

impl CallbackResponder {
    pub fn new(response_url: Option<Url>, client: reqwest::Client) -> Self {
        Self {
            response_url,
            client,
        }
    }

    pub fn response_url(&self) -> Option<&Url> {
        self.response_url.as_ref()
    }

    async fn deliver(&self, response: &Response) -> Result<(), SlashError> {
        let url = self.response_url.clone().ok_or(SlashError::NoResponseUrl)?;

        let status = self.client.post(url).json(response).send().await?.status();
        if !status.is_success() {
            return Err(SlashError::DeliveryStatus(status));
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for CallbackResponder {
    async fn respond(&self, response: Response) -> Result<(), SlashError> {
        let result = self.deliver(&response).await;
        metrics::record_delayed_reply(match &result {
            Ok(()) => "ok",
            Err(err) => err.kind(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_response_url_fails() {
        let responder = CallbackResponder::new(None, reqwest::Client::new());
        assert!(responder.response_url().is_none());

        let err = responder.respond(Response::reply("late")).await.unwrap_err();
        assert!(matches!(err, SlashError::NoResponseUrl));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_delivery_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/hook")).unwrap();
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let responder = CallbackResponder::new(Some(url), client);

        let err = responder.respond(Response::reply("late")).await.unwrap_err();
        assert!(matches!(err, SlashError::Delivery(_)));
    }
}
