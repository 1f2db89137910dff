// Server module - builds the router and runs it until a shutdown signal

use axum::http::HeaderValue;
use axum::Router;
use std::net::{SocketAddr, TcpListener};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::{AppState, Config};

/// Build the full application: `/api` proxy routes, API docs, page shells.
pub fn build_router(state: AppState) -> Router {
    let mut origins = Vec::new();
    for origin in &state.config.cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api::api_router(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    fallback_ports(preferred_port).find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}

/// The preferred port, then up to 99 above it, never past `u16::MAX`.
fn fallback_ports(preferred_port: u16) -> impl Iterator<Item = u16> {
    let last = preferred_port.saturating_add(99);
    preferred_port..=last
}

/// Run the proxy until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<(), String> {
    let port = find_available_port(config.port)
        .ok_or_else(|| "Failed to find available port".to_string())?;

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    tracing::info!("Forwarding to backend at {}", config.backend_url);

    let state = AppState::new(config)
        .map_err(|e| format!("Invalid BACKEND_URL: {}", e))?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Book Haven listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("HTTP server error: {}", e))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_ports_from_default() {
        let ports: Vec<u16> = fallback_ports(8000).collect();
        assert_eq!(ports.len(), 100);
        assert_eq!(ports.first(), Some(&8000));
        assert_eq!(ports.last(), Some(&8099));
    }

    #[test]
    fn test_fallback_ports_stop_at_range_end() {
        let ports: Vec<u16> = fallback_ports(65500).collect();
        assert_eq!(ports.first(), Some(&65500));
        assert_eq!(ports.last(), Some(&u16::MAX));
        assert_eq!(ports.len(), 36);

        assert_eq!(fallback_ports(u16::MAX).collect::<Vec<_>>(), vec![u16::MAX]);
    }

    #[test]
    fn test_busy_port_near_range_end() {
        let _busy = TcpListener::bind(("0.0.0.0", 65500));
        // Must not overflow while scanning past the busy port
        if let Some(port) = find_available_port(65500) {
            assert!(port >= 65500);
        }
    }
}
