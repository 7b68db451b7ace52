use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tracing::error;

use crate::AppContext;

/// GET `/` — the composed home page. A render failure is logged and the page
/// degrades to an empty body rather than failing the request.
pub async fn home(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.composer.render("home.html", serde_json::Value::Null) {
        Ok(bytes) => Html(bytes).into_response(),
        Err(e) => {
            error!(error = %e, "home page render failed");
            Html(Vec::new()).into_response()
        }
    }
}
