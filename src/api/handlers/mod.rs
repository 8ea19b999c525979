//! Route handlers, one module per resource.
//!
//! Handlers parse the request, call into [`crate::core`] and shape the JSON
//! response. Authorization beyond the route gates lives in the core functions.

pub mod admin;
pub mod orders;
pub mod packages;
pub mod tracking;
pub mod users;

use axum::Json;

use super::models::HealthResponse;

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
