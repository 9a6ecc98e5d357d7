//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

use crate::config::{SERVICE_NAME, SERVICE_VERSION};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub system: &'static str,
    pub version: &'static str,
}

/// `GET /`: static liveness payload for the hosting platform's checks.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "awake",
        system: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}
