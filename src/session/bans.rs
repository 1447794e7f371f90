//! Ban list keyed by player name and network address.

use std::net::IpAddr;
use std::sync::RwLock;

use thiserror::Error;

/// Ban list errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BanError {
    /// No entry matches the given name or address.
    #[error("no ban entry for {0}")]
    NotBanned(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// One banned player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanEntry {
    pub name: String,
    pub addr: IpAddr,
}

/// Thread-safe ban list.
#[derive(Debug, Default)]
pub struct BanList {
    entries: RwLock<Vec<BanEntry>>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ban a player name together with its address.
    pub fn ban(&self, name: impl Into<String>, addr: IpAddr) -> Result<(), BanError> {
        let name = name.into();
        let mut entries = self.entries.write().map_err(|_| BanError::LockPoisoned)?;

        if !entries.iter().any(|e| e.name == name && e.addr == addr) {
            entries.push(BanEntry { name, addr });
        }
        Ok(())
    }

    /// Remove every entry matching a player name or an address.
    ///
    /// `id` is tried as an IP address first, then as a name.
    pub fn unban(&self, id: &str) -> Result<(), BanError> {
        let mut entries = self.entries.write().map_err(|_| BanError::LockPoisoned)?;

        let addr: Option<IpAddr> = id.parse().ok();
        let before = entries.len();
        entries.retain(|e| match addr {
            Some(addr) => e.addr != addr,
            None => e.name != id,
        });

        if entries.len() == before {
            return Err(BanError::NotBanned(id.to_string()));
        }
        Ok(())
    }

    /// Check whether a name or an address is banned.
    pub fn is_banned(&self, name: &str, addr: IpAddr) -> bool {
        self.entries
            .read()
            .map(|entries| entries.iter().any(|e| e.name == name || e.addr == addr))
            .unwrap_or(false)
    }

    /// Get the number of entries.
    pub fn count(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}
