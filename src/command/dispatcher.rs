//! Command line dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{builtin, CommandContext, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;
use crate::permission::has_permission;
use crate::session::Connection;

/// Resolves command lines against a frozen registry and runs them.
pub struct Dispatcher {
    registry: CommandRegistry,
    ctx: Arc<CommandContext>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`, finalizing it.
    pub fn new(mut registry: CommandRegistry, ctx: impl Into<Arc<CommandContext>>) -> Self {
        registry.finalize();
        Self {
            registry,
            ctx: ctx.into(),
        }
    }

    /// Create a dispatcher with every built-in command registered.
    pub fn with_builtins(ctx: impl Into<Arc<CommandContext>>) -> Result<Self, RegistryError> {
        let mut registry = CommandRegistry::new();
        builtin::register_all(&mut registry)?;
        Ok(Self::new(registry, ctx))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.ctx
    }

    /// Run a command line and return the reply text.
    ///
    /// Failures are turned into their reply text. An empty reply means
    /// the command already messaged the affected sessions directly.
    pub fn dispatch(&self, caller: Option<&dyn Connection>, line: &str) -> String {
        self.try_dispatch(caller, line)
            .unwrap_or_else(|e| e.to_string())
    }

    /// Run a command line, keeping the failure classification.
    ///
    /// `caller` is `None` for the console, which skips permission checks.
    pub fn try_dispatch(
        &self,
        caller: Option<&dyn Connection>,
        line: &str,
    ) -> Result<String, CommandError> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| CommandError::UnknownCommand(String::new()))?;
        let args: Vec<&str> = words.collect();

        let command = self
            .registry
            .lookup(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        let catalog = self.ctx.catalog.current();
        let who = caller.map(|c| c.name()).unwrap_or("console");

        if let Some(caller) = caller {
            if !has_permission(&catalog, caller.name(), command.perm()) {
                warn!(player = %who, command = %name, perm = %command.perm(), "permission denied");
                return Err(CommandError::PermissionDenied);
            }
        }

        debug!(caller = %who, command = %name, args = ?args, "dispatch");

        let inv = Invocation {
            caller,
            args: &args,
            catalog: &catalog,
            ctx: &self.ctx,
            registry: &self.registry,
            command,
        };
        command.invoke(&inv)
    }
}
