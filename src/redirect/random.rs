//! Random member selection.

use rand::seq::SliceRandom;

/// Picks one candidate uniformly at random.
///
/// Injected into the [`Redirector`](super::Redirector) so group hops can
/// be driven deterministically.
pub trait RandomSource: Send + Sync {
    /// Pick one candidate, or `None` if there are none.
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a str>;
}

/// Thread-local RNG backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}
