// rest/mod.rs — HTTP surface.
//
// Endpoints:
//   GET /              composed home page
//   ANY /update        sync the checkout, JSON array of normalized lines
//   ANY /status        checkout status, JSON array of normalized lines
//   ANY /restart       stop + detached start of the dev server
//   GET /img|/js|/css  static assets

pub mod respond;
pub mod routes;

use anyhow::Result;
use axum::routing::{any, get};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use crate::AppContext;

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let static_dir = Path::new(&ctx.config.static_dir).to_path_buf();
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/update", any(routes::vcs::update))
        .route("/status", any(routes::vcs::status))
        .route("/restart", any(routes::restart::restart))
        .nest_service("/img", ServeDir::new(static_dir.join("img")))
        .nest_service("/js", ServeDir::new(static_dir.join("js")))
        .nest_service("/css", ServeDir::new(static_dir.join("css")))
        .with_state(ctx)
}

pub async fn start_server(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", ctx.config.bind, ctx.config.port).parse()?;
    let router = build_router(ctx);

    info!("dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
