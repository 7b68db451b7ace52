use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::rest::respond::{json_response, ErrorBody};
use crate::restart::RestartOrchestrator;
use crate::AppContext;

/// `/restart` — stop the dev server, then launch it detached. Success means
/// the launch call returned; readiness is not checked.
pub async fn restart(State(ctx): State<Arc<AppContext>>) -> Response {
    let mut orchestrator = RestartOrchestrator::new(ctx.invoker.as_ref(), &ctx.config);
    match orchestrator.run().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => json_response(
            ctx.config.debug,
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorBody::new(e.to_string()),
        ),
    }
}
