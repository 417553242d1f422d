//! Shutdown coordination for a running service instance.

use tokio::sync::broadcast;

/// Owner side of the shutdown signal.
///
/// Held by the application while listening; triggering it tells the
/// serve task to stop accepting and drain.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a watcher for a task that should stop on shutdown.
    pub fn watcher(&self) -> ShutdownWatcher {
        ShutdownWatcher {
            rx: self.tx.subscribe(),
        }
    }

    /// Signal every watcher currently subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait side of the shutdown signal, owned by one task.
#[derive(Debug)]
pub struct ShutdownWatcher {
    rx: broadcast::Receiver<()>,
}

impl ShutdownWatcher {
    /// Resolve once shutdown has been triggered.
    ///
    /// Also resolves if the owning [`Shutdown`] is dropped, so an
    /// abandoned instance cannot leave its serve task running forever.
    pub async fn wait(mut self) {
        let _ = self.rx.recv().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_watcher_resolves_on_trigger() {
        let shutdown = Shutdown::new();
        let watcher = shutdown.watcher();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), watcher.wait())
            .await
            .expect("watcher should resolve after trigger");
    }

    #[tokio::test]
    async fn test_watcher_resolves_when_owner_dropped() {
        let shutdown = Shutdown::new();
        let watcher = shutdown.watcher();
        drop(shutdown);
        tokio::time::timeout(Duration::from_secs(1), watcher.wait())
            .await
            .expect("watcher should resolve after owner drop");
    }
}
