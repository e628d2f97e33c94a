//! Reply values and their wire shape.

use serde::{Deserialize, Serialize};

/// A reply to a slash command.
///
/// Serializes as `{"response_type":"in_channel","text":"..."}` for broadcast
/// replies and `{"text":"..."}` for private ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireResponse", into = "WireResponse")]
pub struct Response {
    pub text: String,
    /// Visible to the whole channel rather than only the invoking user.
    pub in_channel: bool,
}

impl Response {
    /// A reply only the invoking user sees.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_channel: false,
        }
    }

    /// A reply broadcast to the channel.
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_channel: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ResponseType {
    InChannel,
    Ephemeral,
}

#[derive(Serialize, Deserialize)]
struct WireResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_type: Option<ResponseType>,
    #[serde(default)]
    text: String,
}

impl From<Response> for WireResponse {
    fn from(resp: Response) -> Self {
        Self {
            response_type: resp.in_channel.then_some(ResponseType::InChannel),
            text: resp.text,
        }
    }
}

impl From<WireResponse> for Response {
    fn from(wire: WireResponse) -> Self {
        Self {
            text: wire.text,
            in_channel: wire.response_type == Some(ResponseType::InChannel),
        }
    }
}
