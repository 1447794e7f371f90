//! Error types for proxy-commands.
//!
//! [`CommandError`] is the taxonomy every command can fail with. Its
//! `Display` output is the exact reply text shown to the caller, so the
//! dispatcher can fold any failure into a chat message without further
//! formatting. [`Error`] covers process-level failures (config, I/O).

use thiserror::Error;

use crate::redirect::MAX_GROUP_ATTEMPTS;

/// Failure of a single command invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No command is registered under the given name.
    #[error("Command not found: {0}")]
    UnknownCommand(String),

    /// The caller lacks the permission token the command requires.
    #[error("Permission denied.")]
    PermissionDenied,

    /// Wrong argument count or shape. Holds the usage line to show.
    #[error("Usage: {0}")]
    MalformedArguments(String),

    /// The named player has no live session.
    #[error("Player not connected.")]
    PlayerNotConnected,

    /// The target server is not in the catalog.
    #[error("Server does not exist.")]
    UnknownServer,

    /// The target group is not in the catalog.
    #[error("Group does not exist.")]
    UnknownGroup,

    /// A group draw produced the group's own name.
    #[error("Group is also a server.")]
    GroupEqualsServer,

    /// Every group draw landed on the session's current server.
    #[error("Already connected to this server after {} attempts.", MAX_GROUP_ATTEMPTS)]
    RetriesExhausted,

    /// The destination needs a media pool the client does not hold.
    #[error("The new server belongs to a media pool that is not present on this client.")]
    IncompatibleResource,

    /// The session already sits on the requested destination.
    #[error("Already connected to this server.")]
    AlreadyAtDestination,

    /// Any other redirection failure reported by the transport.
    #[error("Could not switch servers. Error: {0}")]
    TransportFailure(String),

    /// The configuration file could not be re-read.
    #[error("Configuration could not be reloaded. Old config is still active. Error: {0}")]
    ConfigReloadFailure(String),

    /// No ban entry matched the given name or address.
    #[error("Could not unban. Error: {0}")]
    BanLookupFailure(String),

    /// The transport refused to ban the session.
    #[error("Could not ban. Error: {0}")]
    BanFailure(String),

    /// The command form acts on the caller's own session.
    #[error("This command form is only available to connected players.")]
    CallerRequired,
}

impl CommandError {
    /// Whether a group hop must stop retrying when it sees this error.
    pub fn is_fatal_hop(&self) -> bool {
        matches!(self, Self::UnknownServer | Self::IncompatibleResource)
    }

    /// Stable machine-readable code, used by the HTTP console.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "UNKNOWN_COMMAND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::MalformedArguments(_) => "MALFORMED_ARGUMENTS",
            Self::PlayerNotConnected => "PLAYER_NOT_CONNECTED",
            Self::UnknownServer => "UNKNOWN_SERVER",
            Self::UnknownGroup => "UNKNOWN_GROUP",
            Self::GroupEqualsServer => "GROUP_EQUALS_SERVER",
            Self::RetriesExhausted => "RETRIES_EXHAUSTED",
            Self::IncompatibleResource => "INCOMPATIBLE_RESOURCE",
            Self::AlreadyAtDestination => "ALREADY_AT_DESTINATION",
            Self::TransportFailure(_) => "TRANSPORT_FAILURE",
            Self::ConfigReloadFailure(_) => "CONFIG_RELOAD_FAILURE",
            Self::BanLookupFailure(_) => "BAN_LOOKUP_FAILURE",
            Self::BanFailure(_) => "BAN_FAILURE",
            Self::CallerRequired => "CALLER_REQUIRED",
        }
    }
}

/// Main error type for process-level operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Configuration was loaded but describes an invalid catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Reload was requested but the catalog has no backing file.
    #[error("no configuration file to reload from")]
    NoConfigSource,

    /// A session with the same player name is already live.
    #[error("session already exists: {0}")]
    SessionExists(String),

    /// Command registration failed.
    #[error("registry error: {0}")]
    Registry(#[from] crate::command::RegistryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for proxy-commands operations.
pub type Result<T> = std::result::Result<T, Error>;
