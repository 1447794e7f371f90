//! Single-server and group hops.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{RandomSource, ThreadRandom};
use crate::catalog::Catalog;
use crate::error::CommandError;
use crate::session::{Connection, TransportError};

/// Maximum number of draws a group hop makes.
pub const MAX_GROUP_ATTEMPTS: usize = 5;

/// Moves sessions between upstream servers.
#[derive(Clone)]
pub struct Redirector {
    random: Arc<dyn RandomSource>,
}

impl Redirector {
    /// Create a redirector drawing group members from `random`.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Move a session to `server`.
    ///
    /// Does not check whether the session is already there; callers
    /// reject that case before hopping.
    pub fn hop(
        &self,
        catalog: &Catalog,
        conn: &dyn Connection,
        server: &str,
    ) -> Result<(), CommandError> {
        if !catalog.has_server(server) {
            return Err(CommandError::UnknownServer);
        }

        conn.hop(server).map_err(|e| {
            warn!(player = %conn.name(), server = %server, error = %e, "hop failed");
            classify(e)
        })
    }

    /// Move a session to a random member of `group`.
    ///
    /// Returns the server the session was moved to. A draw equal to the
    /// session's current server consumes an attempt; running out of
    /// attempts that way yields [`CommandError::RetriesExhausted`]. Fatal
    /// hop errors end the loop immediately, other transport failures are
    /// retried while attempts remain.
    pub fn hop_group(
        &self,
        catalog: &Catalog,
        conn: &dyn Connection,
        group: &str,
    ) -> Result<String, CommandError> {
        let members = catalog
            .group_members(group)
            .ok_or(CommandError::UnknownGroup)?;

        let mut last_error = CommandError::RetriesExhausted;
        for attempt in 1..=MAX_GROUP_ATTEMPTS {
            let server = self
                .random
                .choose(members)
                .ok_or(CommandError::UnknownGroup)?;

            if server == group {
                return Err(CommandError::GroupEqualsServer);
            }

            if server == conn.server_name() {
                debug!(player = %conn.name(), group = %group, attempt, "drew current server");
                last_error = CommandError::RetriesExhausted;
                continue;
            }

            match self.hop(catalog, conn, server) {
                Ok(()) => return Ok(server.to_string()),
                Err(e) if e.is_fatal_hop() => return Err(e),
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}

impl Default for Redirector {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

fn classify(err: TransportError) -> CommandError {
    match err {
        TransportError::NoSuchServer(_) => CommandError::UnknownServer,
        TransportError::NewMediaPool(_) => CommandError::IncompatibleResource,
        other => CommandError::TransportFailure(other.to_string()),
    }
}
