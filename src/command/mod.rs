//! Command registry, dispatch and built-in commands.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use proxy_commands::command::{CommandContext, Dispatcher};
//! use proxy_commands::catalog::CatalogStore;
//! use proxy_commands::session::{BanList, SessionSet};
//! use proxy_commands::shutdown::ShutdownSignal;
//!
//! let ctx = CommandContext::new(
//!     Arc::new(SessionSet::new()),
//!     Arc::new(CatalogStore::default()),
//!     Arc::new(BanList::new()),
//!     ShutdownSignal::new(),
//! );
//! let dispatcher = Dispatcher::with_builtins(ctx).unwrap();
//!
//! // The console caller bypasses permission checks.
//! assert_eq!(dispatcher.dispatch(None, "find alice"), "Player not connected.");
//! ```

pub mod builtin;
mod context;
mod dispatcher;
mod registry;
mod target;
mod text;

pub use context::{CommandContext, Invocation};
pub use dispatcher::Dispatcher;
pub use registry::{CommandDescriptor, CommandRegistry, Handler, RegistryError};
pub use target::{run_cohort, select_targets, Outcome, Step, Target};
pub use text::{colorize, HELP_COLOR, USAGE_COLOR};
