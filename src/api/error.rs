use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::{ProxyError, LOGIN_REDIRECT};

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MissingAuth => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": ProxyError::MissingAuth.to_string(),
                    "redirect": LOGIN_REDIRECT,
                })),
            )
                .into_response(),
            ProxyError::Validation(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ProxyError::InvalidCredentials(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
            }
            ProxyError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(body)).into_response()
            }
            ProxyError::Transport(msg) => {
                tracing::error!("Proxy error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
