//! Shared set of live sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::Connection;
use crate::error::Error;
use crate::Result;

/// Thread-safe set of live connections, keyed by player name.
///
/// The transport attaches and detaches connections; commands only read.
/// Reads clone the `Arc`s under a short read lock and release it before
/// returning, so callers may hop or message the returned connections
/// without blocking connects and disconnects.
pub struct SessionSet {
    sessions: RwLock<HashMap<String, Arc<dyn Connection>>>,
}

impl SessionSet {
    /// Create a new empty session set.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection.
    ///
    /// Fails if a connection with the same name is already live.
    pub fn attach(&self, conn: Arc<dyn Connection>) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(|_| Error::LockPoisoned)?;

        let name = conn.name().to_string();
        if sessions.contains_key(&name) {
            return Err(Error::SessionExists(name));
        }

        sessions.insert(name, conn);
        Ok(())
    }

    /// Remove a connection by name.
    ///
    /// Returns the removed connection, or None if it was not live.
    pub fn detach(&self, name: &str) -> Result<Option<Arc<dyn Connection>>> {
        let mut sessions = self.sessions.write().map_err(|_| Error::LockPoisoned)?;
        Ok(sessions.remove(name))
    }

    /// Find a live connection by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Connection>> {
        match self.sessions.read() {
            Ok(sessions) => sessions.get(name).cloned(),
            Err(poisoned) => poisoned.into_inner().get(name).cloned(),
        }
    }

    /// Point-in-time copy of all live connections, in no particular order.
    pub fn snapshot(&self) -> Vec<Arc<dyn Connection>> {
        match self.sessions.read() {
            Ok(sessions) => sessions.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        }
    }

    /// Send a chat message to every connection live at call time.
    ///
    /// Returns the number of recipients.
    pub fn broadcast(&self, msg: &str) -> usize {
        let recipients = self.snapshot();
        for conn in &recipients {
            conn.send_chat_msg(msg);
        }
        recipients.len()
    }

    /// Get the number of live connections.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for SessionSet {
    fn default() -> Self {
        Self::new()
    }
}
