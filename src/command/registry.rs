//! Command descriptors and the registry holding them.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::Invocation;
use crate::error::CommandError;

/// Handler invoked with the parsed command line.
pub type Handler = Box<dyn Fn(&Invocation<'_>) -> Result<String, CommandError> + Send + Sync>;

/// Registration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A command with the same name is already registered.
    #[error("command already registered: {0}")]
    Duplicate(String),

    /// The registry no longer accepts commands.
    #[error("registry is finalized, cannot register {0}")]
    Finalized(String),
}

/// A named, permission-gated command.
pub struct CommandDescriptor {
    name: String,
    perm: String,
    help: String,
    usage: String,
    console_usage: Option<String>,
    handler: Handler,
}

impl CommandDescriptor {
    /// Create a descriptor with empty help and the name as usage.
    pub fn new<F>(name: impl Into<String>, perm: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            perm: perm.into(),
            help: String::new(),
            console_usage: None,
            handler: Box::new(handler),
        }
    }

    /// Set the help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the usage text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set a distinct usage text shown to the console.
    pub fn console_usage(mut self, usage: impl Into<String>) -> Self {
        self.console_usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permission token a player needs to run the command.
    pub fn perm(&self) -> &str {
        &self.perm
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Usage text for an in-session caller or for the console.
    pub fn usage_for(&self, console: bool) -> &str {
        match (&self.console_usage, console) {
            (Some(usage), true) => usage,
            _ => &self.usage,
        }
    }

    /// Run the handler.
    pub fn invoke(&self, inv: &Invocation<'_>) -> Result<String, CommandError> {
        (self.handler)(inv)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("perm", &self.perm)
            .field("usage", &self.usage)
            .field("console_usage", &self.console_usage)
            .finish_non_exhaustive()
    }
}

/// Table of commands, filled during startup and frozen before serving.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
    finalized: bool,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command.
    ///
    /// Fails if the name is taken or the registry is finalized; the
    /// registry is left unchanged in both cases.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        if self.finalized {
            return Err(RegistryError::Finalized(descriptor.name));
        }
        if self.commands.contains_key(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }

        self.commands.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Reject any further registration.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Look up a command by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// All commands, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
