//! Process shutdown signalling.
//!
//! The `shutdown` command and OS termination signals both end up in one
//! [`ShutdownSignal`]. It fires at most once; later triggers are no-ops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

struct Inner {
    fired: AtomicBool,
    tx: watch::Sender<bool>,
}

/// One-shot, cloneable shutdown flag.
#[derive(Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                fired: AtomicBool::new(false),
                tx,
            }),
        }
    }

    /// Request shutdown.
    ///
    /// Returns `true` only for the call that actually fired the signal.
    pub fn trigger(&self) -> bool {
        if self.inner.fired.swap(true, Ordering::SeqCst) {
            return false;
        }

        info!("shutdown requested");
        self.inner.tx.send_replace(true);
        true
    }

    /// Check if shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }

    /// Wait until shutdown is requested.
    pub async fn wait(&self) {
        let mut rx = self.inner.tx.subscribe();
        // The sender lives in `inner`, so the channel cannot close here.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Trigger `signal` when the process receives SIGINT or SIGTERM (Ctrl+C
/// on Windows).
pub fn listen_for_os_signals(signal: ShutdownSignal) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal as unix_signal, SignalKind};

            let (mut sigint, mut sigterm) = match (
                unix_signal(SignalKind::interrupt()),
                unix_signal(SignalKind::terminate()),
            ) {
                (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!(error = %e, "failed to install signal handlers");
                    return;
                }
            };

            tokio::select! {
                _ = sigint.recv() => info!("SIGINT received"),
                _ = sigterm.recv() => info!("SIGTERM received"),
                _ = signal.wait() => return,
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "failed to listen for Ctrl+C");
                        return;
                    }
                    info!("Ctrl+C received");
                }
                _ = signal.wait() => return,
            }
        }

        signal.trigger();
    });
}
