//! Liveness Responder - the hosting platform's health check.
//!
//! A single route returning a fixed body. Runs on its own OS thread with a
//! dedicated current-thread runtime and blocking serve loop, so it shares
//! nothing with the relay and neither can block the other.

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::thread;
use tower_http::trace::TraceLayer;

/// Fixed body returned to every liveness probe.
pub const LIVENESS_BODY: &str = "Chat courier bot is alive!";

/// Builds the one-route liveness router: `GET /` -> `200 OK`.
pub fn liveness_router() -> Router {
    Router::new()
        .route("/", get(|| async { LIVENESS_BODY }))
        .layer(TraceLayer::new_for_http())
}

/// Spawns the liveness server on a dedicated OS thread.
///
/// Bind or serve failures are logged, not propagated: a broken health
/// endpoint must not take the relay down with it.
pub fn spawn(addr: SocketAddr) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("liveness".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build liveness runtime");

            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::bind(addr).await {
                    Ok(listener) => listener,
                    Err(e) => {
                        tracing::error!(%addr, error = %e, "liveness server failed to bind");
                        return;
                    }
                };

                tracing::info!(%addr, "liveness server listening");
                if let Err(e) = axum::serve(listener, liveness_router()).await {
                    tracing::error!(error = %e, "liveness server terminated");
                }
            });
        })
}
