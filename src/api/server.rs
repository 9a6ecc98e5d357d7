//! Server lifecycle: bind, serve, shut down on ctrl-c.

use std::net::SocketAddr;

use tracing::{error, info};

use super::router::api_router;
use super::types::ApiContext;
use crate::db::{DocumentStore, PolicyStore};
use crate::pipeline::GenerativeClient;

/// Bind and serve the API until the process receives ctrl-c.
pub async fn serve<C, D, P>(ctx: ApiContext<C, D, P>, addr: SocketAddr) -> std::io::Result<()>
where
    C: GenerativeClient + 'static,
    D: DocumentStore + 'static,
    P: PolicyStore + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "webhook server listening");

    axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to install ctrl-c handler");
            // Without a signal handler there is nothing to wait for; park
            // instead of shutting the server down immediately.
            std::future::pending::<()>().await;
        }
    }
}
