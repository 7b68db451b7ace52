//! JSON response assembly.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::Serialize;
use tracing::error;

/// Body shape for action-route failures: `{"message": "<tool error text>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Encode `value` as a JSON body with explicit content-type/length headers.
/// In debug mode cross-origin access is relaxed so a separately served
/// frontend can call the API during development.
///
/// Encoding failure is logged and degrades to an empty 500 — best-effort,
/// matching the page composer's posture, but decided here rather than
/// swallowed.
pub fn json_response<T: Serialize>(debug: bool, status: StatusCode, value: &T) -> Response {
    let body = match serde_json::to_vec(value) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "response serialization failed");
            return empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len());
    if debug {
        builder = builder.header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    }
    match builder.body(Body::from(body)) {
        Ok(resp) => resp,
        Err(e) => {
            error!(error = %e, "response assembly failed");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn empty(status: StatusCode) -> Response {
    let mut resp = Response::new(Body::empty());
    *resp.status_mut() = status;
    resp
}
