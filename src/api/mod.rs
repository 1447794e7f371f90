//! HTTP console for proxy-commands.
//!
//! Operators reach the dispatcher over HTTP instead of from inside a game
//! session. Commands run as the console caller unless a connected player
//! is named.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//! - `GET /api/v1/sessions` - List connected sessions
//! - `GET /api/v1/commands` - List registered commands
//! - `POST /api/v1/dispatch` - Run a command line
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use proxy_commands::api::{serve, AppState, ConsoleConfig};
//! use proxy_commands::command::{CommandContext, Dispatcher};
//! use proxy_commands::catalog::CatalogStore;
//! use proxy_commands::session::{BanList, SessionSet};
//! use proxy_commands::shutdown::ShutdownSignal;
//!
//! #[tokio::main]
//! async fn main() -> proxy_commands::Result<()> {
//!     let shutdown = ShutdownSignal::new();
//!     let ctx = CommandContext::new(
//!         Arc::new(SessionSet::new()),
//!         Arc::new(CatalogStore::default()),
//!         Arc::new(BanList::new()),
//!         shutdown.clone(),
//!     );
//!     let state = AppState::new(Arc::new(Dispatcher::with_builtins(ctx)?));
//!     serve(ConsoleConfig::default(), state, shutdown).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

pub use handlers::AppState;
pub use router::{create_router_with_state, serve, ConsoleConfig};
pub use types::{
    CommandSummary, DispatchRequest, DispatchResponse, ErrorResponse, ListCommandsResponse,
    ListSessionsResponse, SessionSummary,
};
