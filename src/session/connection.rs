//! Wallet connection management.
//!
//! # Responsibilities
//! - Talk to the wallet bridge (the external wallet collaborator)
//! - Reject any network other than the target one
//! - Hand out one cached session per controller lifetime

use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::chain::contract::{MintReader, MintWriter};
use crate::chain::types::{ChainId, ContractRef, MintError, MintResult};

/// Capability object exposed by a wallet.
#[async_trait]
pub trait WalletBridge: Send + Sync {
    /// Network the wallet is currently connected to.
    async fn chain_id(&self) -> MintResult<ChainId>;

    /// Address of the signing account, if the wallet can sign.
    fn account(&self) -> Option<Address>;

    /// Read-only handle to `contract`.
    fn reader(&self, contract: &ContractRef) -> Arc<dyn MintReader>;

    /// Signing handle to `contract`, if the wallet can sign.
    fn signer(&self, contract: &ContractRef) -> Option<Arc<dyn MintWriter>>;
}

/// Active wallet connection with handles derived for the mint contract.
#[derive(Clone)]
pub struct Session {
    reader: Arc<dyn MintReader>,
    signer: Option<Arc<dyn MintWriter>>,
    account: Option<Address>,
}

impl Session {
    /// Read-only contract handle.
    pub fn reader(&self) -> &Arc<dyn MintReader> {
        &self.reader
    }

    /// Signing contract handle, if any.
    pub fn signer(&self) -> Option<&Arc<dyn MintWriter>> {
        self.signer.as_ref()
    }

    /// Signing account, if any.
    pub fn account(&self) -> Option<Address> {
        self.account
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("can_sign", &self.signer.is_some())
            .finish()
    }
}

/// Session-level events the user should see even when no action is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAlert {
    /// An established session was dropped because the wallet left the target network.
    NetworkSwitched { expected: ChainId, actual: ChainId },
}

/// Establishes and caches the wallet session.
pub struct ConnectionManager {
    bridge: Arc<dyn WalletBridge>,
    contract: ContractRef,
    session: ArcSwapOption<Session>,
    alerts: broadcast::Sender<SessionAlert>,
}

impl ConnectionManager {
    /// Create a manager for `contract` on top of `bridge`.
    pub fn new(bridge: Arc<dyn WalletBridge>, contract: ContractRef) -> Self {
        Self {
            bridge,
            contract,
            session: ArcSwapOption::empty(),
            alerts: broadcast::channel(16).0,
        }
    }

    /// Receiver for session alerts. Each network switch is announced once.
    pub fn alerts(&self) -> broadcast::Receiver<SessionAlert> {
        self.alerts.subscribe()
    }

    /// Connect to the wallet, verifying its network.
    ///
    /// With `need_signer`, fails with [`MintError::SignerUnavailable`] when the
    /// wallet cannot sign. A network mismatch drops any cached session.
    pub async fn connect(&self, need_signer: bool) -> MintResult<Arc<Session>> {
        let actual = self.bridge.chain_id().await?;
        if actual != self.contract.chain_id {
            if self.session.swap(None).is_some() {
                tracing::warn!(chain_id = actual.0, "Wallet switched networks, session reset");
                // Err only means nobody is listening.
                let _ = self.alerts.send(SessionAlert::NetworkSwitched {
                    expected: self.contract.chain_id,
                    actual,
                });
            }
            return Err(MintError::NetworkMismatch {
                expected: self.contract.chain_id.0,
                actual: actual.0,
            });
        }

        let session = match self.session.load_full() {
            Some(session) => session,
            None => {
                let session = Arc::new(Session {
                    reader: self.bridge.reader(&self.contract),
                    signer: self.bridge.signer(&self.contract),
                    account: self.bridge.account(),
                });
                tracing::info!(
                    contract = %self.contract.address,
                    account = ?session.account,
                    "Wallet session established"
                );
                self.session.store(Some(session.clone()));
                session
            }
        };

        if need_signer && session.signer.is_none() {
            return Err(MintError::SignerUnavailable);
        }

        Ok(session)
    }

    /// Cached session, if connected.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.session.load_full()
    }

    /// Drop the cached session.
    pub fn disconnect(&self) {
        if self.session.swap(None).is_some() {
            tracing::info!("Wallet session closed");
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("contract", &self.contract)
            .field("connected", &self.session.load().is_some())
            .finish()
    }
}
