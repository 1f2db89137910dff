use axum::{extract::State, response::Response};

use super::relay;
use crate::domain::ProxyError;
use crate::infrastructure::auth::AuthToken;
use crate::infrastructure::BackendClient;

#[utoipa::path(
    get,
    path = "/api/recommend",
    responses(
        (status = 200, description = "Recommended books"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn recommend_books(
    State(backend): State<BackendClient>,
    token: AuthToken,
) -> Result<Response, ProxyError> {
    let response = backend.recommend(&token).await?.into_result()?;
    Ok(relay(response))
}
