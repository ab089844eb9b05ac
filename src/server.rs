//! HTTP listener.
//!
//! Serves a [`MockRouter`] over a single listener. Each request is handled
//! as its own tokio task; the only suspension point per request is the
//! simulated-latency sleep.

use crate::router::MockRouter;
use anyhow::Context;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Dispatch one request by exact path match against the registry.
///
/// Unregistered paths get a plain 404 with no custom headers.
async fn dispatch(State(routes): State<Arc<MockRouter>>, request: Request) -> Response {
    let path = request.uri().path();
    match routes.lookup(path) {
        Some(route) => {
            debug!(path, "serving mocked route");
            route.respond().await
        }
        None => {
            debug!(path, "no route registered");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Build the axum application serving the registry.
pub fn app(router: MockRouter) -> axum::Router {
    axum::Router::new()
        .fallback(dispatch)
        .with_state(Arc::new(router))
}

/// Bind `addr` and serve until the process is terminated.
///
/// A bind failure is fatal; there is no retry. Returns `Ok` only after a
/// graceful shutdown signal.
pub async fn serve(addr: &str, router: MockRouter) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        addr = %listener.local_addr()?,
        routes = router.len(),
        "mock server listening"
    );

    axum::serve(listener, app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => warn!(error = %err, "failed to listen for shutdown signal"),
    }
}
