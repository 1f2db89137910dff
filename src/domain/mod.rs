//! Domain layer - Framework-free error taxonomy
//!
//! No Axum types here; handlers convert these errors into responses.

pub mod errors;

pub use errors::{ProxyError, LOGIN_REDIRECT};
