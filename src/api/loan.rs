use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};

use super::relay;
use crate::domain::ProxyError;
use crate::infrastructure::auth::AuthToken;
use crate::infrastructure::BackendClient;
use crate::models::{BorrowDuration, BorrowRequest};

#[utoipa::path(
    post,
    path = "/api/borrow/{id}",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Backend borrow result, relayed"),
        (status = 400, description = "Duration is not 1, 3 or 7"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn borrow_book(
    State(backend): State<BackendClient>,
    token: AuthToken,
    Path(id): Path<i64>,
    payload: Result<Json<BorrowRequest>, JsonRejection>,
) -> Result<Response, ProxyError> {
    let Json(payload) =
        payload.map_err(|e| ProxyError::Validation(format!("Invalid borrow request: {}", e)))?;
    let duration = BorrowDuration::try_from(payload.duration)
        .map_err(|e| ProxyError::Validation(e.to_string()))?;

    tracing::info!("Borrowing book {} for {} days", id, duration.days());
    let response = backend.borrow(&token, id, duration).await?.into_result()?;
    Ok(relay(response))
}

#[utoipa::path(
    get,
    path = "/api/borrow",
    responses(
        (status = 200, description = "Books currently borrowed by the user"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn list_borrowed(
    State(backend): State<BackendClient>,
    token: AuthToken,
) -> Result<Response, ProxyError> {
    let response = backend.borrowed_books(&token).await?.into_result()?;
    Ok(relay(response))
}

#[utoipa::path(
    post,
    path = "/api/return/{id}",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Backend return result, relayed"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn return_book(
    State(backend): State<BackendClient>,
    token: AuthToken,
    Path(id): Path<i64>,
) -> Result<Response, ProxyError> {
    tracing::info!("Returning book {}", id);
    let response = backend.return_book(&token, id).await?.into_result()?;
    Ok(relay(response))
}
