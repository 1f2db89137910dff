//! Application state shared by the proxy handlers

use std::sync::Arc;

use super::auth::CookiePolicy;
use super::backend::BackendClient;
use super::config::Config;

/// Immutable per-process state; cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: BackendClient,
    pub cookie_policy: CookiePolicy,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, url::ParseError> {
        let backend = BackendClient::new(&config.backend_url)?;
        let cookie_policy = CookiePolicy::from_config(&config);

        Ok(Self {
            config: Arc::new(config),
            backend,
            cookie_policy,
        })
    }
}

impl axum::extract::FromRef<AppState> for BackendClient {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}
