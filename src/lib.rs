pub mod api;
pub mod api_docs;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod ui;

pub use infrastructure::auth;
pub use infrastructure::config;
pub use infrastructure::server;
