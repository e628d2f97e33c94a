//! Inbound slash command model.
//!
//! # Data Flow
//! ```text
//! form body / query string (key=value pairs)
//!     → Command::from_pairs (first value per key wins)
//!     → Command (immutable, cloned into handlers)
//! ```
//!
//! # Design Decisions
//! - Missing fields default to the empty string
//! - An empty `response_url` means delayed replies are unsupported
//! - A non-empty `response_url` that does not parse is a malformed request

use std::borrow::Cow;
use std::collections::HashMap;

use url::Url;

use crate::error::SlashError;

/// An incoming slash command request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Shared secret sent by the platform.
    pub token: String,

    pub team_id: String,
    pub team_domain: String,

    pub channel_id: String,
    pub channel_name: String,

    pub user_id: String,
    pub user_name: String,

    /// Invoked command name, e.g. `/deploy`.
    pub command: String,
    /// Free text typed after the command name.
    pub text: String,

    /// Callback for delayed replies, when the platform supplies one.
    pub response_url: Option<Url>,
}

impl Command {
    /// Build a command from decoded form pairs.
    ///
    /// When a key repeats, the first value is kept.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, SlashError>
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut values: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            values
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        let mut take = |key: &str| values.remove(key).unwrap_or_default();

        let response_url = match take("response_url") {
            raw if raw.is_empty() => None,
            raw => Some(
                Url::parse(&raw)
                    .map_err(|e| SlashError::InvalidRequest(format!("invalid response_url: {e}")))?,
            ),
        };

        Ok(Self {
            token: take("token"),
            team_id: take("team_id"),
            team_domain: take("team_domain"),
            channel_id: take("channel_id"),
            channel_name: take("channel_name"),
            user_id: take("user_id"),
            user_name: take("user_name"),
            command: take("command"),
            text: take("text"),
            response_url,
        })
    }

    /// Whether delayed replies can be sent for this command.
    pub fn supports_delayed_replies(&self) -> bool {
        self.response_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &str) -> Result<Command, SlashError> {
        Command::from_pairs(url::form_urlencoded::parse(raw.as_bytes()))
    }

    #[test]
    fn test_from_pairs_reads_all_fields() {
        let cmd = pairs(
            "token=abc&team_id=T1&team_domain=acme&channel_id=C1&channel_name=ops\
             &user_id=U1&user_name=ada&command=%2Fdeploy&text=acme-inc+to+staging\
             &response_url=https%3A%2F%2Fhooks.example.com%2Fcommands%2F1",
        )
        .unwrap();

        assert_eq!(cmd.token, "abc");
        assert_eq!(cmd.team_domain, "acme");
        assert_eq!(cmd.channel_name, "ops");
        assert_eq!(cmd.user_name, "ada");
        assert_eq!(cmd.command, "/deploy");
        assert_eq!(cmd.text, "acme-inc to staging");
        assert_eq!(
            cmd.response_url.as_ref().map(Url::as_str),
            Some("https://hooks.example.com/commands/1")
        );
        assert!(cmd.supports_delayed_replies());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let cmd = pairs("command=%2Fweather").unwrap();
        assert_eq!(cmd.command, "/weather");
        assert_eq!(cmd.token, "");
        assert_eq!(cmd.text, "");
        assert!(cmd.response_url.is_none());
    }

    #[test]
    fn test_first_value_wins() {
        let cmd = pairs("text=first&text=second").unwrap();
        assert_eq!(cmd.text, "first");
    }

    #[test]
    fn test_empty_response_url_is_absent() {
        let cmd = pairs("response_url=").unwrap();
        assert!(!cmd.supports_delayed_replies());
    }

    #[test]
    fn test_invalid_response_url_is_rejected() {
        let err = pairs("response_url=not+a+url").unwrap_err();
        assert!(matches!(err, SlashError::InvalidRequest(_)));
    }
}
