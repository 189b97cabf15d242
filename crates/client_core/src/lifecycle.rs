//! Cancellation tied to a mounted screen.

use tokio::sync::watch;

/// Owned by a mounted screen. Dropping it, or calling [`ScreenLifecycle::cancel`],
/// cancels every token handed out by [`ScreenLifecycle::token`].
#[derive(Debug)]
pub struct ScreenLifecycle {
    tx: watch::Sender<bool>,
}

impl ScreenLifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for ScreenLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenLifecycle {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the owning lifecycle is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
