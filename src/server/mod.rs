// src/server/mod.rs
// =============================================================================
// This module runs the HTTP server.
//
// Submodules:
// - routes: the /tree and /ai handlers
// - cors: CORS headers and preflight answers
// - sink: LineSink over a hyper body channel (streaming responses)
//
// Each connection gets a clone of the shared Arc<App>; each request runs its
// own pipeline on its own task. Ctrl-C stops accepting new connections and
// lets in-flight requests finish.
// =============================================================================

mod cors;
mod routes;
mod sink;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use tracing::{info, warn};

use crate::app::App;

/// Serves the API on `addr` until Ctrl-C
pub async fn serve(app: Arc<App>, addr: SocketAddr) -> Result<()> {
    let make_svc = make_service_fn(move |_conn| {
        let app = app.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| routes::handle(app.clone(), req))) }
    });

    let server = Server::try_bind(&addr)
        .with_context(|| format!("could not bind {}", addr))?
        .serve(make_svc);

    info!(addr = %server.local_addr(), "Server starting");

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            // Without a signal handler we just keep serving
            warn!(error = %e, "could not listen for Ctrl-C");
            futures::future::pending::<()>().await
        }
    }
}
