//! Domain error types
//!
//! These errors are framework-agnostic and describe why a proxied request
//! could not be completed. The HTTP mapping lives in the api layer.

use std::fmt;

use serde_json::Value;

/// Client-side route the UI is sent to when a request needs a session.
pub const LOGIN_REDIRECT: &str = "/login";

#[derive(Debug)]
pub enum ProxyError {
    /// No `auth-token` cookie on the request
    MissingAuth,
    /// A required field or parameter is missing or malformed
    Validation(String),
    /// Token issuance was refused by the backend
    InvalidCredentials(String),
    /// Backend answered with a non-success status
    Upstream { status: u16, body: Value },
    /// Network failure or unparsable backend response
    Transport(String),
}

impl ProxyError {
    pub fn upstream(status: u16, body: Value) -> Self {
        ProxyError::Upstream { status, body }
    }

    /// Same upstream status, body replaced by a flat `{error}` message.
    pub fn upstream_message(status: u16, message: &str) -> Self {
        ProxyError::Upstream {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MissingAuth => write!(f, "Authentication required. Please log in."),
            ProxyError::Validation(msg) => write!(f, "{}", msg),
            ProxyError::InvalidCredentials(msg) => write!(f, "{}", msg),
            ProxyError::Upstream { status, .. } => write!(f, "Backend returned status {}", status),
            ProxyError::Transport(msg) => write!(f, "Backend request failed: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        ProxyError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for ProxyError {
    fn from(e: url::ParseError) -> Self {
        ProxyError::Transport(format!("invalid backend url: {}", e))
    }
}
