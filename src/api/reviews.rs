use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;

use super::relay;
use crate::domain::ProxyError;
use crate::infrastructure::auth::AuthToken;
use crate::infrastructure::BackendClient;
use crate::models::NewReview;

const MISSING_FIELDS: &str = "Missing bookId, rating, or comment";

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    #[serde(rename = "bookId")]
    pub book_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = NewReview,
    responses(
        (status = 201, description = "Created review, relayed"),
        (status = 400, description = "Missing bookId, rating, or comment"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn submit_review(
    State(backend): State<BackendClient>,
    token: AuthToken,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<Response, ProxyError> {
    let Json(review) = payload.map_err(|_| ProxyError::Validation(MISSING_FIELDS.to_string()))?;
    let (book_id, rating, comment) = review
        .complete()
        .ok_or_else(|| ProxyError::Validation(MISSING_FIELDS.to_string()))?;

    let response = backend
        .submit_review(&token, book_id, rating, comment)
        .await?;
    if !response.is_success() {
        tracing::error!("Backend response: {}", response.body);
        return Err(ProxyError::upstream_message(
            response.status.as_u16(),
            "Failed to submit review",
        ));
    }

    Ok(relay(response))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    params(("bookId" = i64, Query, description = "Book whose reviews to list")),
    responses(
        (status = 200, description = "Reviews of the book"),
        (status = 400, description = "Missing bookId parameter"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn list_reviews(
    State(backend): State<BackendClient>,
    token: AuthToken,
    Query(query): Query<ReviewsQuery>,
) -> Result<Response, ProxyError> {
    let book_id = query
        .book_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ProxyError::Validation("Missing bookId parameter".to_string()))?
        .parse::<i64>()
        .map_err(|_| ProxyError::Validation("Invalid bookId parameter".to_string()))?;

    let response = backend.reviews(&token, book_id).await?;
    if !response.is_success() {
        tracing::error!("Backend response: {}", response.body);
        return Err(ProxyError::upstream_message(
            response.status.as_u16(),
            "Failed to fetch reviews",
        ));
    }

    Ok(relay(response))
}
