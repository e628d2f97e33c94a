//! Error types for command dispatch.
//!
//! Every failure is scoped to one command's processing. The core returns
//! errors to its caller; only the HTTP adaptor turns them into a status and
//! a body.

use thiserror::Error;

/// Error kinds produced while routing a command or delivering its replies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlashError {
    /// No route matched the command.
    #[error("slash: no handler")]
    NoHandler,

    /// The command's token did not match the expected secret.
    #[error("slash: invalid token")]
    Unauthorized,

    /// A second reply was attempted inside the inline window.
    #[error("slash: you can only reply once")]
    AlreadyReplied,

    /// A delayed reply was attempted but the command carried no `response_url`.
    #[error("slash: command has no response_url, delayed replies are unsupported")]
    NoResponseUrl,

    /// The delayed reply could not be sent.
    #[error("slash: delayed reply failed: {0}")]
    Delivery(#[from] reqwest::Error),

    /// The `response_url` endpoint answered with a non-success status.
    #[error("slash: delayed reply rejected with status {0}")]
    DeliveryStatus(reqwest::StatusCode),

    /// The delayed reply ceiling was reached.
    #[error("slash: you can send a maximum of {max} delayed responses")]
    TooManyResponses { max: usize },

    /// The inbound request could not be turned into a command.
    #[error("slash: malformed request: {0}")]
    InvalidRequest(String),

    /// A handler failed with its own message.
    #[error("{0}")]
    Handler(String),
}

impl SlashError {
    /// Wrap an arbitrary handler failure. The message is shown to the user.
    pub fn handler(message: impl std::fmt::Display) -> Self {
        SlashError::Handler(message.to_string())
    }

    /// Short, stable label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SlashError::NoHandler => "no_handler",
            SlashError::Unauthorized => "unauthorized",
            SlashError::AlreadyReplied => "already_replied",
            SlashError::NoResponseUrl => "no_response_url",
            SlashError::Delivery(_) => "delivery",
            SlashError::DeliveryStatus(_) => "delivery_status",
            SlashError::TooManyResponses { .. } => "too_many_responses",
            SlashError::InvalidRequest(_) => "invalid_request",
            SlashError::Handler(_) => "handler",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = SlashError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(SlashError::NoHandler.to_string(), "slash: no handler");
        assert_eq!(SlashError::Unauthorized.to_string(), "slash: invalid token");
        assert_eq!(
            SlashError::TooManyResponses { max: 5 }.to_string(),
            "slash: you can send a maximum of 5 delayed responses"
        );
    }

    #[test]
    fn test_handler_error_keeps_message() {
        let err = SlashError::handler("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.kind(), "handler");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(SlashError::AlreadyReplied.kind(), "already_replied");
        assert_eq!(SlashError::InvalidRequest("x".into()).kind(), "invalid_request");
        assert_eq!(
            SlashError::DeliveryStatus(reqwest::StatusCode::BAD_REQUEST).kind(),
            "delivery_status"
        );
    }
}
