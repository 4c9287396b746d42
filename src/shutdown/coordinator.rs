/*!
 * Shutdown Coordinator
 * Fans SIGINT/SIGTERM out to the control loop over a watch channel
 */

use crate::core::errors::{SupervisorError, SupervisorResult};
use log::info;
use std::sync::Arc;
use tokio::sync::watch;

/// Broadcasts a one-way "stop now" edge to any number of observers
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    tx: Arc<watch::Sender<bool>>,
}

/// Receiving half handed to tasks that must stop on shutdown
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownCoordinator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe a new observer
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Flip the shutdown flag; returns false if it was already set
    pub fn trigger(&self) -> bool {
        let mut fired = false;
        self.tx.send_if_modified(|stopping| {
            if *stopping {
                false
            } else {
                *stopping = true;
                fired = true;
                true
            }
        });
        fired
    }

    /// Spawn the OS signal listener that feeds this coordinator
    ///
    /// SIGINT and SIGTERM both trigger shutdown. Must be called from within
    /// a tokio runtime.
    pub fn install(&self) -> SupervisorResult<()> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut interrupt =
                signal(SignalKind::interrupt()).map_err(SupervisorError::SignalSetup)?;
            let mut terminate =
                signal(SignalKind::terminate()).map_err(SupervisorError::SignalSetup)?;
            let coordinator = self.clone();
            tokio::spawn(async move {
                let received = tokio::select! {
                    _ = interrupt.recv() => "SIGINT",
                    _ = terminate.recv() => "SIGTERM",
                };
                info!("Received {}, initiating shutdown", received);
                coordinator.trigger();
            });
            Ok(())
        }
        #[cfg(not(unix))]
        {
            let coordinator = self.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::warn!("Failed to listen for ctrl-c: {}", e);
                    return;
                }
                info!("Received ctrl-c, initiating shutdown");
                coordinator.trigger();
            });
            Ok(())
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolves once shutdown has been triggered
    ///
    /// Cancellation-safe: dropping and re-awaiting never loses the edge.
    /// A dropped coordinator counts as shutdown.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|stopping| *stopping).await;
    }

    /// Non-blocking check of the shutdown flag
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_observers() {
        let coordinator = ShutdownCoordinator::new();
        let mut signal = coordinator.signal();
        assert!(!signal.is_cancelled());

        coordinator.trigger();
        signal.cancelled().await;
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let coordinator = ShutdownCoordinator::new();
        assert!(coordinator.trigger());
        assert!(!coordinator.trigger());
    }

    #[tokio::test]
    async fn test_late_subscriber_still_sees_trigger() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.trigger();

        let mut signal = coordinator.signal();
        signal.cancelled().await;
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_coordinator_releases_waiters() {
        let coordinator = ShutdownCoordinator::new();
        let mut signal = coordinator.signal();
        drop(coordinator);
        signal.cancelled().await;
    }
}
