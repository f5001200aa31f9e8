//! Shutdown coordination.
//!
//! The server stops through exactly one path: something calls
//! [`Shutdown::trigger`] (the OS signal watcher in `main`, or a test) and
//! every subscribed task drains and exits. Dropping the coordinator closes
//! the channel, which subscribers treat the same as a trigger.

use tokio::sync::broadcast;

/// Hands out shutdown receivers and fires the stop signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    ///
    /// Must be called before [`trigger`](Self::trigger); a receiver created
    /// afterwards would miss the broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscriber to stop accepting work and drain.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
