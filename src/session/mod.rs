//! Live player sessions.
//!
//! This module defines the [`Connection`] contract the proxy transport
//! fulfils, the shared [`SessionSet`] of live connections, the
//! [`BanList`], and [`LocalTransport`], an in-process transport used to
//! embed the command layer without a network stack.

mod bans;
mod connection;
mod local;
mod store;

pub use bans::{BanEntry, BanError, BanList};
pub use connection::{Connection, TransportError};
pub use local::{LocalConnection, LocalTransport};
pub use store::SessionSet;
