//! Inbound request parsing.
//!
//! # Responsibilities
//! - Read form pairs from the query string and the form body
//! - Enforce the body size limit
//! - Produce a `Command`, or reject the request before any routing
//!
//! # Design Decisions
//! - The body is only read as a form when the content type says so
//! - Body values come before query values, so they win on duplicate keys
//! - Percent-escapes are checked before decoding; a broken escape rejects the
//!   whole request

use axum::{
    body::Body,
    http::{header, Request},
};
use url::form_urlencoded;

use crate::command::Command;
use crate::error::SlashError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Reject `%` not followed by two hex digits.
fn check_escapes(raw: &[u8], source: &str) -> Result<(), SlashError> {
    let mut rest = raw;
    while let Some(pos) = rest.iter().position(|&b| b == b'%') {
        let escape = rest.get(pos + 1..pos + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(SlashError::InvalidRequest(format!(
                "invalid URL escape in {source} at byte {}",
                raw.len() - rest.len() + pos
            )));
        }
        rest = &rest[pos + 3..];
    }
    Ok(())
}

/// Parse the slash command carried by `request`.
pub async fn parse_command(request: Request<Body>, max_body_size: usize) -> Result<Command, SlashError> {
    let query = request.uri().query().unwrap_or_default().to_string();
    let form = is_form(&request);

    let body = axum::body::to_bytes(request.into_body(), max_body_size)
        .await
        .map_err(|e| SlashError::InvalidRequest(format!("failed to read body: {e}")))?;

    let body: &[u8] = if form {
        std::str::from_utf8(&body)
            .map_err(|_| SlashError::InvalidRequest("form body is not valid UTF-8".into()))?;
        &body
    } else {
        &[]
    };

    check_escapes(body, "body")?;
    check_escapes(query.as_bytes(), "query")?;

    Command::from_pairs(form_urlencoded::parse(body).chain(form_urlencoded::parse(query.as_bytes())))
}
