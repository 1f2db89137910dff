use super::gateway::LibraryGateway;
use super::routes::Route;
use crate::models::{LoginRequest, RegisterRequest};

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Inline message from the last failed attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self, gateway: &dyn LibraryGateway) -> Option<Route> {
        self.error = None;
        let credentials = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        match gateway.login(&credentials).await {
            Ok(()) => Some(Route::Home),
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", self.username, e);
                self.error = Some(e.message().unwrap_or("Login failed").to_string());
                None
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl RegisterForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// On success the user continues to the login page.
    pub async fn submit(&mut self, gateway: &dyn LibraryGateway) -> Option<Route> {
        self.error = None;
        let form = RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match gateway.register(&form).await {
            Ok(()) => Some(Route::Login),
            Err(e) => {
                tracing::error!("Registration error: {}", e);
                self.error = Some(e.message().unwrap_or("Registration failed").to_string());
                None
            }
        }
    }
}
