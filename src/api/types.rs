//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::command::CommandDescriptor;
use crate::error::CommandError;
use crate::session::Connection;

/// Request to run a command line.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    /// The command line, e.g. `send all lobby`.
    pub command: String,
    /// Connected player to run the command as. Omit for the console.
    #[serde(default)]
    pub caller: Option<String>,
}

/// Result of running a command line.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    /// Whether the command succeeded.
    pub success: bool,
    /// Reply text, empty when the command messaged sessions directly.
    pub reply: String,
    /// Failure code (e.g., "PERMISSION_DENIED").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResponse {
    pub fn from_result(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(reply) => Self {
                success: true,
                reply,
                error: None,
            },
            Err(e) => Self {
                success: false,
                reply: e.to_string(),
                error: Some(e.code().to_string()),
            },
        }
    }
}

/// Summary of a connected session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub name: String,
    /// Upstream server, empty if none.
    pub server: String,
    pub address: String,
}

impl SessionSummary {
    pub fn from_connection(conn: &dyn Connection) -> Self {
        Self {
            name: conn.name().to_string(),
            server: conn.server_name(),
            address: conn.remote_addr().to_string(),
        }
    }
}

/// Response for session listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}

/// Summary of a registered command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSummary {
    pub name: String,
    /// Permission token a player needs.
    pub perm: String,
    pub help: String,
    /// Usage as shown to the console.
    pub usage: String,
}

impl CommandSummary {
    pub fn from_descriptor(cmd: &CommandDescriptor) -> Self {
        Self {
            name: cmd.name().to_string(),
            perm: cmd.perm().to_string(),
            help: cmd.help_text().to_string(),
            usage: cmd.usage_for(true).to_string(),
        }
    }
}

/// Response for command listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListCommandsResponse {
    pub commands: Vec<CommandSummary>,
    pub total: usize,
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "SESSION_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn session_not_found(name: &str) -> Self {
        Self::new("SESSION_NOT_FOUND", format!("Player '{}' is not connected", name))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
