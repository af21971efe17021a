//! Periodic status polling.
//!
//! Two independent tasks: one refreshes the minted count, the other the
//! presale flags. Both are bound to the session and stop on [`Poller::stop`]
//! or when the poller is dropped.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::lifecycle::{Shutdown, ShutdownSignal};
use crate::session::refresh::StatusSync;

/// Handle to the running polling tasks.
pub struct Poller {
    shutdown: Shutdown,
    handles: Vec<JoinHandle<()>>,
}

impl Poller {
    /// Spawn both polling tasks. The first refresh happens one `period` from now.
    pub fn start(sync: StatusSync, period: Duration) -> Self {
        let shutdown = Shutdown::new();

        tracing::info!(interval_secs = period.as_secs(), "Status polling starting");

        let minted = {
            let sync = sync.clone();
            tokio::spawn(run_periodic("minted_count", period, shutdown.signal(), move || {
                let sync = sync.clone();
                async move {
                    let _ = sync.refresh_minted_count().await;
                }
            }))
        };

        let presale = tokio::spawn(run_periodic("presale_status", period, shutdown.signal(), move || {
            let sync = sync.clone();
            async move {
                let _ = sync.refresh_presale_status().await;
            }
        }));

        Self {
            shutdown,
            handles: vec![minted, presale],
        }
    }

    /// Cancel both tasks and wait until they have exited.
    pub async fn stop(mut self) {
        self.shutdown.trigger();
        for handle in std::mem::take(&mut self.handles) {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Polling task ended abnormally");
            }
        }
        tracing::info!("Status polling stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if self.shutdown.trigger() {
            tracing::debug!("Poller dropped, polling tasks cancelled");
        }
    }
}

async fn run_periodic<F, Fut>(
    task: &'static str,
    period: Duration,
    mut shutdown: ShutdownSignal,
    mut tick: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::trace!(task, "Polling tick");
                tick().await;
            }
            _ = shutdown.cancelled() => {
                tracing::debug!(task, "Polling task received shutdown signal, exiting loop");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_periodic_fires_every_period_until_shutdown() {
        let shutdown = Shutdown::new();
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let handle = tokio::spawn(run_periodic("test", Duration::from_secs(5), shutdown.signal(), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        }));

        time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(10_200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        assert!(shutdown.trigger());
        handle.await.unwrap();

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
