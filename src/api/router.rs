//! Route table for the ingestion service.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::endpoints::{health, webhook};
use super::types::ApiContext;
use crate::db::{DocumentStore, PolicyStore};
use crate::pipeline::GenerativeClient;

/// Build the service router: ingestion webhook plus liveness check.
pub fn api_router<C, D, P>(ctx: ApiContext<C, D, P>) -> Router
where
    C: GenerativeClient + 'static,
    D: DocumentStore + 'static,
    P: PolicyStore + 'static,
{
    Router::new()
        .route("/", get(health::check))
        .route("/webhook/process-coi", post(webhook::process::<C, D, P>))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
