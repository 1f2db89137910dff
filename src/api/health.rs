use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::BackendClient;

/// Liveness of the proxy itself; the backend is named but not contacted.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub backend: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Proxy is up", body = HealthStatus)
    )
)]
pub async fn health_check(State(backend): State<BackendClient>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: "book-haven".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: backend.base_url().as_str().to_owned(),
    })
}
