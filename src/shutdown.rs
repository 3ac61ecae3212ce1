use std::io;

use tokio::signal::unix::{Signal, SignalKind, signal};

/// Installed termination-signal listeners.
///
/// Listeners are registered up front so a signal arriving while the event
/// loop is mid-wait is never missed. Only `SIGINT` and `SIGTERM` are
/// handled; every other signal keeps its default disposition.
#[derive(Debug)]
pub struct ShutdownSignal {
    sigint: Signal,
    sigterm: Signal,
}

impl ShutdownSignal {
    /// Register the `SIGINT` and `SIGTERM` listeners.
    ///
    /// # Errors
    /// Returns an error if signal registration with the runtime fails.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Resolve when the first termination signal arrives.
    pub async fn wait(mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {}
            _ = self.sigterm.recv() => {}
        }
    }
}
