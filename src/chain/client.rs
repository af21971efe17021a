//! JSON-RPC wallet bridge.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Identify the network the node serves
//! - Derive read-only and signing contract handles
//!
//! # Design Decisions
//! - Providers are built once; every session handle shares them
//! - Network identification is bounded by the RPC timeout, confirmation waits are not

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::chain::contract::{MintReader, MintWriter, NftContract};
use crate::chain::types::{ChainId, ContractRef, MintError, MintResult};
use crate::chain::wallet::Wallet;
use crate::config::NetworkConfig;
use crate::session::WalletBridge;

/// Wallet bridge backed by an HTTP node and an optional local signing key.
pub struct RpcWallet {
    read_provider: DynProvider,
    sign_provider: Option<DynProvider>,
    account: Option<Address>,
    config: NetworkConfig,
    timeout_duration: Duration,
}

impl RpcWallet {
    /// Create a bridge for `config`. Without `wallet` the bridge is read-only.
    ///
    /// No request is sent here; the first network call happens on connect.
    pub fn new(config: NetworkConfig, wallet: Option<Wallet>) -> MintResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            MintError::Connection(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let read_provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        let sign_provider = wallet.as_ref().map(|w| {
            ProviderBuilder::new()
                .wallet(w.ethereum_wallet())
                .connect_http(url.clone())
                .erased()
        });

        tracing::info!(
            rpc_url = %config.rpc_url,
            can_sign = sign_provider.is_some(),
            "RPC wallet bridge initialized"
        );

        Ok(Self {
            read_provider,
            sign_provider,
            account: wallet.map(|w| w.address()),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }

    fn contract(&self, contract: &ContractRef, provider: DynProvider) -> NftContract {
        NftContract::new(contract, provider, self.timeout_duration, self.config.confirmations)
    }
}

#[async_trait]
impl WalletBridge for RpcWallet {
    async fn chain_id(&self) -> MintResult<ChainId> {
        match timeout(self.timeout_duration, self.read_provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(MintError::Connection(format!("RPC error: {}", e))),
            Err(_) => Err(MintError::Connection(format!(
                "RPC timeout after {} seconds",
                self.config.rpc_timeout_secs
            ))),
        }
    }

    fn account(&self) -> Option<Address> {
        self.account
    }

    fn reader(&self, contract: &ContractRef) -> Arc<dyn MintReader> {
        Arc::new(self.contract(contract, self.read_provider.clone()))
    }

    fn signer(&self, contract: &ContractRef) -> Option<Arc<dyn MintWriter>> {
        self.sign_provider
            .clone()
            .map(|provider| Arc::new(self.contract(contract, provider)) as Arc<dyn MintWriter>)
    }
}

impl std::fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWallet")
            .field("rpc_url", &self.config.rpc_url)
            .field("account", &self.account)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
