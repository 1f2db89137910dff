use crate::api;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::register,
        api::auth::auth_status,
        api::auth::logout,
        api::books::list_books,
        api::recommend::recommend_books,
        api::loan::borrow_book,
        api::loan::list_borrowed,
        api::loan::return_book,
        api::reviews::submit_review,
        api::reviews::list_reviews,
    ),
    components(
        schemas(
            api::health::HealthStatus,
            models::AuthStatus,
            models::BorrowRequest,
            models::LoginRequest,
            models::LoginResponse,
            models::NewReview,
            models::RegisterRequest,
        )
    ),
    tags(
        (name = "book-haven", description = "Book Haven proxy API")
    )
)]
pub struct ApiDoc;
