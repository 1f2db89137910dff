//! Navigation bar auth indicator.
//!
//! The indicator asks `/api/auth_check` when mounted and then on a fixed
//! interval. The poll runs on its own task and is aborted when the indicator
//! is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::gateway::LibraryGateway;
use super::routes::Route;

pub const AUTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct AuthIndicator {
    gateway: Arc<dyn LibraryGateway>,
    state: Arc<watch::Sender<bool>>,
    poller: JoinHandle<()>,
}

impl AuthIndicator {
    pub fn mount(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self::mount_with_interval(gateway, AUTH_POLL_INTERVAL)
    }

    pub fn mount_with_interval(gateway: Arc<dyn LibraryGateway>, period: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        let state = Arc::new(tx);

        let poller = tokio::spawn(poll_auth(gateway.clone(), state.clone(), period));

        Self {
            gateway,
            state,
            poller,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.state.borrow()
    }

    /// Receiver that sees every change of the authenticated flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// Clear the session; on success the indicator flips to logged out and
    /// the user is sent to the login page.
    pub async fn logout(&self) -> Option<Route> {
        match self.gateway.logout().await {
            Ok(()) => {
                self.state.send_replace(false);
                Some(Route::Login)
            }
            Err(e) => {
                tracing::error!("Error logging out: {}", e);
                None
            }
        }
    }

    /// Target of the "My Books" link.
    pub fn my_books(&self) -> Route {
        if self.is_authenticated() {
            Route::MyBooks
        } else {
            Route::Login
        }
    }
}

impl Drop for AuthIndicator {
    fn drop(&mut self) {
        self.poller.abort();
    }
}

async fn poll_auth(
    gateway: Arc<dyn LibraryGateway>,
    state: Arc<watch::Sender<bool>>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately: that's the check on mount
        interval.tick().await;
        let authenticated = match gateway.auth_status().await {
            Ok(authenticated) => authenticated,
            Err(e) => {
                tracing::error!("Error checking authentication: {}", e);
                false
            }
        };
        state.send_replace(authenticated);
    }
}
