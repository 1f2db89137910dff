use axum::{
    extract::{Query, State},
    response::Response,
};

use super::relay;
use crate::domain::ProxyError;
use crate::infrastructure::auth::AuthToken;
use crate::infrastructure::{BackendClient, BookQuery};

#[utoipa::path(
    get,
    path = "/api/list_books",
    params(
        ("genre" = Option<String>, Query, description = "Two-letter genre code"),
        ("available_only" = Option<String>, Query, description = "Only books with copies left"),
        ("search" = Option<String>, Query, description = "Author or title substring")
    ),
    responses(
        (status = 200, description = "Books matching the filters"),
        (status = 401, description = "No auth-token cookie")
    )
)]
pub async fn list_books(
    State(backend): State<BackendClient>,
    token: AuthToken,
    Query(query): Query<BookQuery>,
) -> Result<Response, ProxyError> {
    tracing::debug!("Listing books with {:?}", query);
    let response = backend.list_books(&token, &query).await?.into_result()?;
    Ok(relay(response))
}
