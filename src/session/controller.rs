//! Mint session controller.
//!
//! # Responsibilities
//! - Own the wallet connection and the polling tasks bound to it
//! - Run the page-load sequence
//! - Execute the user actions (connect, start presale, presale mint, public mint)
//! - Publish [`MintStatus`] to the presentation layer
//!
//! # Design Decisions
//! - Status lives in a `watch` channel; the renderer re-renders on change
//! - Writes hold `loading` for their whole submit-then-confirm cycle and
//!   clear it in every outcome
//! - At most one write is in flight; a second one fails with
//!   [`MintError::WriteInProgress`] and leaves `loading` alone
//! - Nothing is rolled back locally on failure: the chain is the record

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch, Mutex};

use crate::chain::contract::{MintWriter, PRESALE_PRICE, PUBLIC_PRICE};
use crate::chain::types::{ContractRef, MintError, MintResult, TxOutcome};
use crate::session::connection::{ConnectionManager, SessionAlert, WalletBridge};
use crate::session::poller::Poller;
use crate::session::refresh::StatusSync;
use crate::session::status::MintStatus;

/// Drives one mint page session.
pub struct MintController {
    connection: Arc<ConnectionManager>,
    status: Arc<watch::Sender<MintStatus>>,
    sync: StatusSync,
    poll_interval: Duration,
    poller: Mutex<Option<Poller>>,
    write_in_flight: AtomicBool,
}

/// Clears the in-flight flag when the write finishes, however it finishes.
struct WriteGuard<'a>(&'a AtomicBool);

impl<'a> WriteGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MintController {
    /// Create a controller for `contract`, reached through `bridge`.
    pub fn new(bridge: Arc<dyn WalletBridge>, contract: ContractRef, poll_interval: Duration) -> Self {
        let connection = Arc::new(ConnectionManager::new(bridge, contract));
        let status = Arc::new(watch::Sender::new(MintStatus::default()));
        let sync = StatusSync::new(connection.clone(), status.clone());

        Self {
            connection,
            status,
            sync,
            poll_interval,
            poller: Mutex::new(None),
            write_in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> MintStatus {
        *self.status.borrow()
    }

    /// Receiver that is notified whenever the status changes.
    pub fn subscribe(&self) -> watch::Receiver<MintStatus> {
        self.status.subscribe()
    }

    /// Session alerts, such as the wallet leaving the target network while polling.
    pub fn alerts(&self) -> broadcast::Receiver<SessionAlert> {
        self.connection.alerts()
    }

    /// Whether the polling tasks are running.
    pub async fn is_polling(&self) -> bool {
        self.poller.lock().await.is_some()
    }

    /// Connect the wallet. `wallet_connected` is only set on success.
    pub async fn connect(&self) -> MintResult<()> {
        match self.connection.connect(false).await {
            Ok(_) => {
                self.status.send_if_modified(|s| {
                    let changed = !s.wallet_connected;
                    s.wallet_connected = true;
                    changed
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Wallet connection failed");
                Err(e)
            }
        }
    }

    /// Page-load sequence: connect, read the initial state, start polling.
    ///
    /// Fails only when the wallet cannot be connected; individual reads are
    /// best-effort.
    pub async fn load(&self) -> MintResult<()> {
        self.connect().await?;

        let _ = self.sync.refresh_owner().await;
        let _ = self.sync.refresh_presale_status().await;
        let _ = self.sync.refresh_minted_count().await;

        self.start_polling().await;
        Ok(())
    }

    /// Refresh the owner flag now.
    pub async fn refresh_owner(&self) -> MintResult<bool> {
        self.sync.refresh_owner().await
    }

    /// Refresh the minted count now.
    pub async fn refresh_minted_count(&self) -> MintResult<u64> {
        self.sync.refresh_minted_count().await
    }

    /// Refresh the presale flags now.
    pub async fn refresh_presale_status(&self) -> MintResult<bool> {
        self.sync.refresh_presale_status().await
    }

    /// Start the polling tasks if they are not already running.
    pub async fn start_polling(&self) {
        let mut poller = self.poller.lock().await;
        if poller.is_none() {
            *poller = Some(Poller::start(self.sync.clone(), self.poll_interval));
        }
    }

    /// Stop the polling tasks and wait for them to exit.
    pub async fn stop_polling(&self) {
        let poller = self.poller.lock().await.take();
        if let Some(poller) = poller {
            poller.stop().await;
        }
    }

    /// Tear the session down: stop polling, drop the wallet session, reset status.
    pub async fn disconnect(&self) {
        self.stop_polling().await;
        self.connection.disconnect();
        self.status.send_replace(MintStatus::default());
    }

    /// Whitelisted mint at the fixed presale price.
    pub async fn mint_presale(&self) -> MintResult<TxOutcome> {
        self.write("presale_mint", |writer| async move {
            writer.presale_mint(PRESALE_PRICE).await
        })
        .await
    }

    /// Public mint at the fixed public price.
    pub async fn mint_public(&self) -> MintResult<TxOutcome> {
        self.write("public_mint", |writer| async move { writer.mint(PUBLIC_PRICE).await })
            .await
    }

    /// Owner-only: open the presale. Marks the presale started once mined.
    pub async fn start_presale(&self) -> MintResult<TxOutcome> {
        let outcome = self
            .write("start_presale", |writer| async move { writer.start_presale().await })
            .await?;
        self.status.send_if_modified(|s| {
            let changed = !s.presale_started;
            s.presale_started = true;
            changed
        });
        Ok(outcome)
    }

    async fn write<F, Fut>(&self, action: &'static str, submit: F) -> MintResult<TxOutcome>
    where
        F: FnOnce(Arc<dyn MintWriter>) -> Fut,
        Fut: std::future::Future<Output = MintResult<TxOutcome>>,
    {
        let Some(_guard) = WriteGuard::acquire(&self.write_in_flight) else {
            tracing::warn!(action, "Another transaction is still pending, action rejected");
            return Err(MintError::WriteInProgress);
        };

        self.set_loading(true);

        let result = async {
            let session = self.connection.connect(true).await?;
            let writer = session
                .signer()
                .cloned()
                .ok_or(MintError::SignerUnavailable)?;
            submit(writer).await
        }
        .await;

        self.set_loading(false);

        match &result {
            Ok(outcome) => tracing::info!(
                action,
                tx_hash = %outcome.tx_hash,
                block_number = ?outcome.block_number,
                "Mint action confirmed"
            ),
            Err(e) => tracing::error!(action, error = %e, "Mint action failed"),
        }

        result
    }

    fn set_loading(&self, loading: bool) {
        self.status.send_if_modified(|s| {
            let changed = s.loading != loading;
            s.loading = loading;
            changed
        });
    }
}

impl std::fmt::Debug for MintController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintController")
            .field("connection", &self.connection)
            .field("status", &self.status())
            .finish()
    }
}
