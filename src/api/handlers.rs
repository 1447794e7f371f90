//! REST API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use super::types::{
    CommandSummary, DispatchRequest, DispatchResponse, ErrorResponse, ListCommandsResponse,
    ListSessionsResponse, SessionSummary,
};
use crate::command::Dispatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ctx = state.dispatcher.context();
    Json(serde_json::json!({
        "name": "proxy-commands",
        "version": env!("CARGO_PKG_VERSION"),
        "status": if ctx.shutdown.is_triggered() { "stopping" } else { "running" },
        "uptime_secs": ctx.uptime().as_secs_f64(),
        "sessions": ctx.sessions.count(),
    }))
}

/// List connected sessions, sorted by name.
pub async fn list_sessions(State(state): State<AppState>) -> Json<ListSessionsResponse> {
    let mut sessions: Vec<SessionSummary> = state
        .dispatcher
        .context()
        .sessions
        .snapshot()
        .iter()
        .map(|conn| SessionSummary::from_connection(conn.as_ref()))
        .collect();
    sessions.sort_by(|a, b| a.name.cmp(&b.name));

    let total = sessions.len();
    Json(ListSessionsResponse { sessions, total })
}

/// List registered commands, sorted by name.
pub async fn list_commands(State(state): State<AppState>) -> Json<ListCommandsResponse> {
    let mut commands: Vec<CommandSummary> = state
        .dispatcher
        .registry()
        .all()
        .map(CommandSummary::from_descriptor)
        .collect();
    commands.sort_by(|a, b| a.name.cmp(&b.name));

    let total = commands.len();
    Json(ListCommandsResponse { commands, total })
}

/// Run a command line as the console or as a connected player.
///
/// Command failures are part of a successful response; only an unknown
/// caller or a crashed handler produce an HTTP error.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(req): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = match req.caller.as_deref() {
        Some(name) => Some(state.dispatcher.context().sessions.find(name).ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::session_not_found(name)),
            )
        })?),
        None => None,
    };

    // Hops and reloads block; keep them off the async workers.
    let dispatcher = Arc::clone(&state.dispatcher);
    let result = tokio::task::spawn_blocking(move || {
        dispatcher.try_dispatch(caller.as_deref(), &req.command)
    })
    .await
    .map_err(|e| {
        warn!(error = %e, "dispatch task failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal_error(e.to_string())),
        )
    })?;

    Ok(Json(DispatchResponse::from_result(result)))
}
