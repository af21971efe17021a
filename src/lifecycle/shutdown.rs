//! Cancellation of background tasks.

use tokio::sync::watch;

/// Latched cancellation for every task bound to one session.
///
/// The flag only ever goes from running to cancelled. A signal taken after the
/// trigger still observes it, and dropping the `Shutdown` cancels as well.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(false),
        }
    }

    /// Signal handle for one task.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Cancel every task. Returns `true` only for the call that flipped the flag.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|cancelled| !std::mem::replace(cancelled, true))
    }

    /// Whether [`Shutdown::trigger`] has been called.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Task-side view of a [`Shutdown`].
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once the session is cancelled or its `Shutdown` is gone.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}
