//! Session redirection.
//!
//! [`Redirector::hop`] moves one session to a named server;
//! [`Redirector::hop_group`] moves it to a random member of a server
//! group, redrawing up to [`MAX_GROUP_ATTEMPTS`] times when the draw lands
//! on the server the session is already on.

mod engine;
mod random;

pub use engine::{Redirector, MAX_GROUP_ATTEMPTS};
pub use random::{RandomSource, ThreadRandom};
