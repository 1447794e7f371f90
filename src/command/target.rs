//! Target selection and best-effort bulk execution.
//!
//! Redirecting commands act on one named player, on everyone sharing the
//! caller's server, or on everyone. Bulk forms never stop at a failing
//! target: the failure is sent to that session and the rest carry on.

use std::sync::Arc;

use tracing::{info, warn};

use super::Invocation;
use crate::error::CommandError;
use crate::session::Connection;

/// Sessions a command acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// One named player.
    Player(&'a str),
    /// Every session on the caller's current server.
    Current,
    /// Every session.
    All,
}

impl<'a> Target<'a> {
    /// Parse `player <dest> <name> | current <dest> | all <dest>`.
    ///
    /// Returns the target and the destination argument. `current` is not
    /// available to the console.
    pub fn parse(inv: &Invocation<'a>) -> Result<(Self, &'a str), CommandError> {
        match *inv.args {
            ["player", dest, name] => Ok((Target::Player(name), dest)),
            ["current", dest] if !inv.is_console() => Ok((Target::Current, dest)),
            ["all", dest] => Ok((Target::All, dest)),
            _ => Err(inv.usage()),
        }
    }
}

/// Resolve a target to live sessions.
///
/// Bulk targets are a snapshot: sessions may disconnect or move before
/// they are acted on.
pub fn select_targets(
    inv: &Invocation<'_>,
    target: Target<'_>,
) -> Result<Vec<Arc<dyn Connection>>, CommandError> {
    match target {
        Target::Player(name) => Ok(vec![inv.find_player(name)?]),
        Target::Current => {
            let server = inv.session()?.server_name();
            Ok(inv
                .ctx
                .sessions
                .snapshot()
                .into_iter()
                .filter(|c| c.server_name() == server)
                .collect())
        }
        Target::All => Ok(inv.ctx.sessions.snapshot()),
    }
}

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The session was moved to this server.
    Moved(String),
    /// The session needed no action.
    Skipped,
}

/// Result for one target of a bulk command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub player: String,
    pub result: Result<Step, CommandError>,
}

/// Message sent to a session whose redirection failed.
pub(crate) fn failure_notice(err: &CommandError) -> String {
    format!(
        "Could not switch servers. Reconnect if you encounter any problems. Error: {}",
        err
    )
}

/// Apply `action` to every target, reporting failures to the target.
pub fn run_cohort<F>(
    command: &str,
    targets: Vec<Arc<dyn Connection>>,
    mut action: F,
) -> Vec<Outcome>
where
    F: FnMut(&dyn Connection) -> Result<Step, CommandError>,
{
    let outcomes: Vec<Outcome> = targets
        .iter()
        .map(|conn| {
            let result = action(conn.as_ref());
            if let Err(ref e) = result {
                warn!(command = %command, player = %conn.name(), error = %e, "target failed");
                conn.send_chat_msg(&failure_notice(e));
            }
            Outcome {
                player: conn.name().to_string(),
                result,
            }
        })
        .collect();

    let moved = outcomes
        .iter()
        .filter(|o| matches!(o.result, Ok(Step::Moved(_))))
        .count();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(command = %command, targets = outcomes.len(), moved, failed, "bulk redirect");

    outcomes
}
