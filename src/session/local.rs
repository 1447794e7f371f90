//! In-process transport.
//!
//! [`LocalTransport`] attaches [`LocalConnection`]s to a [`SessionSet`]
//! and answers hops from the active catalog instead of a network backend.
//! It reproduces the failure modes of a real proxy link (unknown server,
//! foreign media pool, closed connection) so the command layer can be
//! embedded and exercised without one.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, RwLock, Weak};

use tracing::{debug, info};

use super::{BanList, Connection, SessionSet, TransportError};
use crate::catalog::CatalogStore;

/// Collaborators a local connection acts through.
struct Link {
    catalog: Arc<CatalogStore>,
    sessions: Weak<SessionSet>,
    bans: Arc<BanList>,
}

#[derive(Debug, Default)]
struct LinkState {
    server: String,
    media_pools: HashSet<String>,
    kicked: Option<String>,
}

/// A connection served by [`LocalTransport`].
pub struct LocalConnection {
    name: String,
    addr: SocketAddr,
    state: RwLock<LinkState>,
    messages: Mutex<Vec<String>>,
    link: Option<Link>,
}

impl LocalConnection {
    /// Create a connection that is not backed by any transport.
    ///
    /// It reports the given server, records chat messages and refuses to
    /// hop or ban.
    pub fn detached(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
            state: RwLock::new(LinkState {
                server: server.into(),
                ..LinkState::default()
            }),
            messages: Mutex::new(Vec::new()),
            link: None,
        }
    }

    /// Chat messages delivered to this connection so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Reason the connection was kicked with, if it was.
    pub fn kick_reason(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.kicked.clone())
    }

    /// Check if the connection has been kicked or banned.
    pub fn is_closed(&self) -> bool {
        self.kick_reason().is_some()
    }
}

impl Connection for LocalConnection {
    fn name(&self) -> &str {
        &self.name
    }

    fn server_name(&self) -> String {
        self.state
            .read()
            .map(|s| s.server.clone())
            .unwrap_or_default()
    }

    fn remote_addr(&self) -> SocketAddr {
        self.addr
    }

    fn send_chat_msg(&self, msg: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(msg.to_string());
        }
    }

    fn hop(&self, server: &str) -> Result<(), TransportError> {
        let link = self.link.as_ref().ok_or(TransportError::Closed)?;

        let catalog = link.catalog.current();
        let descriptor = catalog
            .server(server)
            .ok_or_else(|| TransportError::NoSuchServer(server.to_string()))?;

        let mut state = self
            .state
            .write()
            .map_err(|_| TransportError::Other("connection state poisoned".into()))?;

        if state.kicked.is_some() {
            return Err(TransportError::Closed);
        }
        if !state.media_pools.contains(&descriptor.media_pool) {
            return Err(TransportError::NewMediaPool(server.to_string()));
        }

        debug!(player = %self.name, from = %state.server, to = %server, "hop");
        state.server = server.to_string();
        Ok(())
    }

    fn kick(&self, reason: &str) {
        if let Ok(mut state) = self.state.write() {
            if state.kicked.is_some() {
                return;
            }
            state.kicked = Some(reason.to_string());
        }

        info!(player = %self.name, reason = %reason, "kicked");
        if let Some(sessions) = self.link.as_ref().and_then(|l| l.sessions.upgrade()) {
            let _ = sessions.detach(&self.name);
        }
    }

    fn ban(&self) -> Result<(), TransportError> {
        let link = self.link.as_ref().ok_or(TransportError::Closed)?;

        link.bans
            .ban(self.name.clone(), self.addr.ip())
            .map_err(|e| TransportError::Other(e.to_string()))?;

        self.kick("Banned by proxy.");
        Ok(())
    }
}

/// Transport that keeps every connection inside the process.
#[derive(Clone)]
pub struct LocalTransport {
    catalog: Arc<CatalogStore>,
    sessions: Arc<SessionSet>,
    bans: Arc<BanList>,
}

impl LocalTransport {
    pub fn new(catalog: Arc<CatalogStore>, sessions: Arc<SessionSet>, bans: Arc<BanList>) -> Self {
        Self {
            catalog,
            sessions,
            bans,
        }
    }

    /// Connect a player to a server and attach the session.
    ///
    /// The client is considered to hold the media pool of the server it
    /// first joins.
    pub fn connect(
        &self,
        name: impl Into<String>,
        addr: SocketAddr,
        server: &str,
    ) -> Result<Arc<LocalConnection>, TransportError> {
        let name = name.into();

        if self.bans.is_banned(&name, addr.ip()) {
            return Err(TransportError::Other(format!("{} is banned", name)));
        }

        let catalog = self.catalog.current();
        let descriptor = catalog
            .server(server)
            .ok_or_else(|| TransportError::NoSuchServer(server.to_string()))?;

        let conn = Arc::new(LocalConnection {
            name,
            addr,
            state: RwLock::new(LinkState {
                server: server.to_string(),
                media_pools: HashSet::from([descriptor.media_pool.clone()]),
                kicked: None,
            }),
            messages: Mutex::new(Vec::new()),
            link: Some(Link {
                catalog: Arc::clone(&self.catalog),
                sessions: Arc::downgrade(&self.sessions),
                bans: Arc::clone(&self.bans),
            }),
        });

        self.sessions
            .attach(conn.clone())
            .map_err(|e| TransportError::Other(e.to_string()))?;

        info!(player = %conn.name, server = %server, addr = %addr, "connected");
        Ok(conn)
    }

    /// Session set connections are attached to.
    pub fn sessions(&self) -> &Arc<SessionSet> {
        &self.sessions
    }
}
