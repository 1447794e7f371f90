//! The connection contract provided by the proxy transport.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors a transport reports when acting on a connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The destination server is not known to the transport.
    #[error("no such server: {0}")]
    NoSuchServer(String),

    /// The destination needs media the client has not loaded.
    #[error("server {0} uses a media pool the client does not have")]
    NewMediaPool(String),

    /// The connection is already closed.
    #[error("connection closed")]
    Closed,

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// A live client connection owned by the proxy transport.
///
/// The command layer only ever holds these behind `Arc`s taken from a
/// session snapshot, and never holds a lock while calling into them:
/// [`hop`](Connection::hop) may block on network I/O.
pub trait Connection: Send + Sync {
    /// Player name, unique among live connections.
    fn name(&self) -> &str;

    /// Name of the current upstream server, empty if not attached yet.
    fn server_name(&self) -> String;

    /// Remote address of the client.
    fn remote_addr(&self) -> SocketAddr;

    /// Deliver a chat message to the client.
    fn send_chat_msg(&self, msg: &str);

    /// Move the client to another upstream server.
    fn hop(&self, server: &str) -> Result<(), TransportError>;

    /// Disconnect the client with a reason.
    fn kick(&self, reason: &str);

    /// Ban the client by name and address, then disconnect it.
    fn ban(&self) -> Result<(), TransportError>;
}

impl fmt::Debug for dyn Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name())
            .field("server", &self.server_name())
            .field("addr", &self.remote_addr())
            .finish()
    }
}
