use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::relay;
use crate::domain::ProxyError;
use crate::infrastructure::auth::{delete_tokens, get_token, set_token};
use crate::infrastructure::AppState;
use crate::models::{AuthStatus, LoginRequest, LoginResponse, RegisterRequest};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, auth-token cookie set", body = LoginResponse),
        (status = 401, description = "Credentials refused")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ProxyError> {
    let Json(credentials) = payload.map_err(|e| {
        tracing::error!("Login error: {}", e);
        ProxyError::InvalidCredentials("Invalid credentials".to_string())
    })?;
    tracing::info!("Login attempt for user: {}", credentials.username);

    let access = state.backend.issue_token(&credentials).await?;
    tracing::info!("Token issued for user: {}", credentials.username);

    Ok((
        set_token(jar, access, state.cookie_policy),
        Json(LoginResponse { logged_in: true }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, relayed from the backend")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterRequest>,
) -> Result<Response, ProxyError> {
    tracing::info!("Registration for user: {}", form.username);
    let response = state.backend.register(&form).await?.into_result()?;
    Ok(relay(response))
}

/// Presence check only: the token is not validated against the backend.
#[utoipa::path(
    get,
    path = "/api/auth_check",
    responses((status = 200, description = "Whether a token cookie is present", body = AuthStatus))
)]
pub async fn auth_status(jar: CookieJar) -> Json<AuthStatus> {
    Json(AuthStatus {
        is_authenticated: get_token(&jar).is_some(),
    })
}

#[utoipa::path(
    post,
    path = "/api/auth_check",
    responses((status = 200, description = "Token cookie cleared", body = AuthStatus))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AuthStatus>) {
    tracing::info!("Logging out");
    (
        delete_tokens(jar),
        Json(AuthStatus {
            is_authenticated: false,
        }),
    )
}
