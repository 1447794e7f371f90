//! Shared command state and the per-call invocation view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{CommandDescriptor, CommandRegistry};
use crate::catalog::{Catalog, CatalogStore};
use crate::error::CommandError;
use crate::redirect::Redirector;
use crate::session::{BanList, Connection, SessionSet};
use crate::shutdown::ShutdownSignal;

/// Collaborators every command can reach.
pub struct CommandContext {
    pub sessions: Arc<SessionSet>,
    pub catalog: Arc<CatalogStore>,
    pub bans: Arc<BanList>,
    pub redirector: Redirector,
    pub shutdown: ShutdownSignal,
    started_at: Instant,
}

impl CommandContext {
    pub fn new(
        sessions: Arc<SessionSet>,
        catalog: Arc<CatalogStore>,
        bans: Arc<BanList>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            sessions,
            catalog,
            bans,
            redirector: Redirector::default(),
            shutdown,
            started_at: Instant::now(),
        }
    }

    /// Replace the redirector, e.g. to inject a random source.
    pub fn with_redirector(mut self, redirector: Redirector) -> Self {
        self.redirector = redirector;
        self
    }

    /// Time since the context was created.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Everything a handler sees for one call.
///
/// `catalog` is pinned when dispatch starts, so one command never mixes
/// two configurations even if a reload lands while it runs.
pub struct Invocation<'a> {
    /// The calling session, or `None` for the console.
    pub caller: Option<&'a dyn Connection>,
    pub args: &'a [&'a str],
    pub catalog: &'a Catalog,
    pub ctx: &'a CommandContext,
    pub registry: &'a CommandRegistry,
    pub command: &'a CommandDescriptor,
}

impl<'a> Invocation<'a> {
    /// Check if the call comes from the console.
    pub fn is_console(&self) -> bool {
        self.caller.is_none()
    }

    /// Usage error for this command, worded for the caller kind.
    pub fn usage(&self) -> CommandError {
        CommandError::MalformedArguments(self.command.usage_for(self.is_console()).to_string())
    }

    /// The in-session caller, or an error for the console.
    pub fn session(&self) -> Result<&'a dyn Connection, CommandError> {
        self.caller.ok_or(CommandError::CallerRequired)
    }

    /// The in-session caller, or the usage error for the console.
    ///
    /// Used by commands whose argument-less form reports on the caller.
    pub fn session_or_usage(&self) -> Result<&'a dyn Connection, CommandError> {
        self.caller.ok_or_else(|| self.usage())
    }

    /// Find a connected player by name.
    pub fn find_player(&self, name: &str) -> Result<Arc<dyn Connection>, CommandError> {
        self.ctx
            .sessions
            .find(name)
            .ok_or(CommandError::PlayerNotConnected)
    }
}
