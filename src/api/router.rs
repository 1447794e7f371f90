//! API router configuration.

use std::future::IntoFuture;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers::{api_info, dispatch, health, list_commands, list_sessions, AppState};
use crate::shutdown::ShutdownSignal;

/// Create the API router with all routes configured.
pub fn create_router_with_state(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/", get(api_info))
        .route("/sessions", get(list_sessions))
        .route("/commands", get(list_commands))
        .route("/dispatch", post(dispatch));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Console server configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Let in-flight requests finish when shutdown is requested.
    pub graceful_shutdown: bool,
}

impl ConsoleConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            graceful_shutdown: true,
        }
    }

    /// Drop open connections immediately on shutdown.
    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 40080)
    }
}

/// Serve the console until `shutdown` fires.
pub async fn serve(
    config: ConsoleConfig,
    state: AppState,
    shutdown: ShutdownSignal,
) -> crate::Result<()> {
    let addr = config.bind_address();
    let router = create_router_with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Console listening on {}", addr);

    let server = axum::serve(listener, router);
    if config.graceful_shutdown {
        server
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;
    } else {
        tokio::select! {
            result = server.into_future() => result?,
            _ = shutdown.wait() => {}
        }
    }

    info!("Console stopped");
    Ok(())
}
