//! Rendering of inline replies and errors.
//!
//! # Design Decisions
//! - Inline replies are JSON followed by a newline
//! - Every command error is a 400 with the error text as a plain body

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response as HttpResponse},
};

use crate::error::SlashError;
use crate::reply::Response;

/// Render `reply` as the inline HTTP response.
pub fn inline_reply(reply: &Response) -> HttpResponse {
    match serde_json::to_vec(reply) {
        Ok(mut body) => {
            body.push(b'\n');
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

impl IntoResponse for SlashError {
    fn into_response(self) -> HttpResponse {
        (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{self}\n"),
        )
            .into_response()
    }
}
