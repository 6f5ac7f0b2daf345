use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use color_eyre::eyre::{Result, WrapErr};
use std::net::SocketAddr;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

use super::{api, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        // `get` would also answer HEAD with the full scrape
        .route(
            "/metrics",
            get(api::metrics).head(|| async { StatusCode::METHOD_NOT_ALLOWED }),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Serves `/metrics` on `addr` until Ctrl-C.
pub async fn server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);

    let server = axum::Server::try_bind(&addr)
        .wrap_err_with(|| format!("failed to bind {addr}"))?
        .serve(app.into_make_service());
    tracing::info!("listening at http://{}/metrics", server.local_addr());
    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("http server failed")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for ctrl-c");
        // never resolve, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
