//! Version-control action routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use tracing::error;

use crate::command::normalize::normalize;
use crate::rest::respond::{json_response, ErrorBody};
use crate::AppContext;

/// `/update` — sync the project checkout, return the normalized tool output.
pub async fn update(State(ctx): State<Arc<AppContext>>) -> Response {
    run_vcs(&ctx, "update").await
}

/// `/status` — report the checkout's dirty state.
pub async fn status(State(ctx): State<Arc<AppContext>>) -> Response {
    run_vcs(&ctx, "status").await
}

async fn run_vcs(ctx: &AppContext, subcommand: &str) -> Response {
    let cfg = &ctx.config;
    let args = vec![subcommand.to_string(), cfg.project_dir.clone()];
    match ctx.invoker.run(&cfg.vcs_bin, &args, None).await {
        Ok(out) => json_response(
            cfg.debug,
            StatusCode::OK,
            &normalize(&out, &cfg.project_dir),
        ),
        Err(e) => {
            error!(error = %e, subcommand, "version-control command failed");
            json_response(
                cfg.debug,
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorBody::new(e.to_string()),
            )
        }
    }
}
