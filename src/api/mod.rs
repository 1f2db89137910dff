pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod loan;
pub mod recommend;
pub mod reviews;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::infrastructure::{AppState, BackendResponse};

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Session
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/auth_check", get(auth::auth_status).post(auth::logout))
        // Catalog
        .route("/list_books", get(books::list_books))
        .route("/recommend", get(recommend::recommend_books))
        // Loans
        .route("/borrow", get(loan::list_borrowed))
        .route("/borrow/:id", post(loan::borrow_book))
        .route("/return/:id", post(loan::return_book))
        // Reviews
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::submit_review),
        )
        .with_state(state)
}

/// Send the backend's body and status code back unchanged.
pub(crate) fn relay(response: BackendResponse) -> Response {
    (response.status, Json(response.body)).into_response()
}
