//! Unix signal handling for the daemon.
//!
//! - SIGTERM/SIGINT: shutdown
//! - SIGHUP: refresh the schedule now
//!
//! On other platforms only Ctrl-C is handled.

use std::io;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

/// Turns OS signals into shutdown and reload notifications.
pub struct SignalHandler {
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
    /// Bumped on every reload request.
    reload_tx: Arc<watch::Sender<u64>>,
    reload_rx: watch::Receiver<u64>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (reload_tx, reload_rx) = watch::channel(0);

        Self {
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
            reload_tx: Arc::new(reload_tx),
            reload_rx,
        }
    }

    /// Installs the signal handlers and spawns the listener task.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be installed.
    #[cfg(unix)]
    pub fn spawn_listener(&self) -> io::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sighup = signal(SignalKind::hangup())?;

        let shutdown_tx = self.shutdown_tx.clone();
        let reload_tx = self.reload_tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down");
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down");
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                    _ = sighup.recv() => {
                        info!("Received SIGHUP, refreshing");
                        reload_tx.send_modify(|n| *n = n.wrapping_add(1));
                    }
                }
            }

            debug!("Signal listener stopped");
        });
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn spawn_listener(&self) -> io::Result<()> {
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received Ctrl+C, shutting down");
                let _ = shutdown_tx.send(true);
            }
        });
        Ok(())
    }

    /// Returns a future-producing handle that completes on shutdown.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_rx.clone(),
        }
    }

    /// Returns a handle that yields once per reload request.
    pub fn reload(&self) -> ReloadSignal {
        let mut rx = self.reload_rx.clone();
        rx.mark_unchanged();
        ReloadSignal { rx }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Programmatically triggers a shutdown.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Programmatically requests a refresh.
    pub fn trigger_reload(&self) {
        self.reload_tx.send_modify(|n| *n = n.wrapping_add(1));
    }
}

/// Completes when shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for the shutdown signal. Returns immediately if it already fired.
    pub async fn wait(mut self) {
        // A dropped sender counts as shutdown.
        let _ = self.rx.wait_for(|down| *down).await;
    }
}

/// Yields once per reload request.
pub struct ReloadSignal {
    rx: watch::Receiver<u64>,
}

impl ReloadSignal {
    /// Waits for the next reload request.
    ///
    /// Requests that arrive while nobody is waiting collapse into one. Never
    /// completes once the handler is dropped.
    pub async fn recv(&mut self) {
        if self.rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_shutdown() {
        let handler = SignalHandler::new();
        assert!(!handler.is_shutdown());

        handler.trigger_shutdown();
        assert!(handler.is_shutdown());

        let result = tokio::time::timeout(Duration::from_millis(100), handler.shutdown().wait()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn shutdown_wait_pends_until_triggered() {
        let handler = SignalHandler::new();
        let result = tokio::time::timeout(Duration::from_millis(20), handler.shutdown().wait()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn reload_yields_per_request() {
        let handler = SignalHandler::new();
        let mut reload = handler.reload();

        let pending = tokio::time::timeout(Duration::from_millis(20), reload.recv()).await;
        assert!(pending.is_err());

        handler.trigger_reload();
        let first = tokio::time::timeout(Duration::from_millis(100), reload.recv()).await;
        assert!(first.is_ok());

        let again = tokio::time::timeout(Duration::from_millis(20), reload.recv()).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn reload_requests_collapse() {
        let handler = SignalHandler::new();
        let mut reload = handler.reload();

        handler.trigger_reload();
        handler.trigger_reload();

        assert!(tokio::time::timeout(Duration::from_millis(100), reload.recv()).await.is_ok());
        assert!(tokio::time::timeout(Duration::from_millis(20), reload.recv()).await.is_err());
    }
}
