use std::fmt;

use serde_json::Value;

/// Failure of a call from a view model to the proxy.
#[derive(Debug)]
pub enum ClientError {
    /// Proxy answered with a non-success status
    Status { status: u16, body: Value },
    /// Network failure or undecodable response
    Transport(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401, .. })
    }

    /// The `error` field of a JSON error body, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } => body.get("error").and_then(Value::as_str),
            ClientError::Transport(_) => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            ClientError::Transport(msg) => write!(f, "Request failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::Transport(e.to_string())
    }
}
