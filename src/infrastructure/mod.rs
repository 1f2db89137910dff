//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Token cookie store and extractor (auth)
//! - Library API client (backend)
//! - HTTP server setup (server)
//! - Application state (state)

pub mod auth;
pub mod backend;
pub mod config;
pub mod server;
pub mod state;

pub use backend::{BackendClient, BackendResponse, BookQuery};
pub use config::Config;
pub use state::AppState;
