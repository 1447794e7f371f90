//! # proxy-commands
//!
//! Chat command control plane for a multi-server game proxy.
//!
//! Players connected through the proxy, and operators at the console,
//! issue text commands that inspect the proxy and move sessions between
//! backend servers. This crate holds everything between the command line
//! and the transport:
//!
//! - **Command registry**: named, permission-gated commands, frozen at startup
//! - **Permissions**: player to group to permission token lookup
//! - **Catalog**: servers, server groups and permission tables, hot-reloadable
//! - **Redirection**: single-server hops and random group hops with bounded retries
//! - **Console**: HTTP API for operators
//!
//! The network transport stays outside. It plugs in through the
//! [`session::Connection`] trait; [`session::LocalTransport`] is an
//! in-process implementation.
//!
//! ## Quick Start
//!
//! ```
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use proxy_commands::catalog::{Catalog, CatalogStore};
//! use proxy_commands::command::{CommandContext, Dispatcher};
//! use proxy_commands::config::{Config, ServerEntry};
//! use proxy_commands::session::{BanList, Connection, LocalTransport, SessionSet};
//! use proxy_commands::shutdown::ShutdownSignal;
//!
//! # fn main() -> proxy_commands::Result<()> {
//! let config = Config {
//!     servers: vec![
//!         ServerEntry::new("lobby", "10.0.0.1:30000"),
//!         ServerEntry::new("arena", "10.0.0.2:30000"),
//!     ],
//!     ..Config::default()
//! };
//!
//! let sessions = Arc::new(SessionSet::new());
//! let catalog = Arc::new(CatalogStore::new(Catalog::from_config(&config)?));
//! let bans = Arc::new(BanList::new());
//! let transport = LocalTransport::new(catalog.clone(), sessions.clone(), bans.clone());
//!
//! let ctx = CommandContext::new(sessions, catalog, bans, ShutdownSignal::new());
//! let dispatcher = Dispatcher::with_builtins(ctx)?;
//!
//! let addr: SocketAddr = "192.168.0.10:40000".parse().unwrap();
//! let alice = transport.connect("alice", addr, "lobby").unwrap();
//!
//! assert_eq!(dispatcher.dispatch(None, "find alice"), "alice is connected to lobby");
//! dispatcher.dispatch(None, "send player arena alice");
//! assert_eq!(alice.server_name(), "arena");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod permission;
pub mod redirect;
pub mod session;
pub mod shutdown;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogStore};
pub use command::{CommandContext, CommandDescriptor, CommandRegistry, Dispatcher};
pub use error::{CommandError, Error, Result};
pub use redirect::{Redirector, MAX_GROUP_ATTEMPTS};
pub use session::{BanList, Connection, LocalConnection, LocalTransport, SessionSet};
pub use shutdown::ShutdownSignal;
