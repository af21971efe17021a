//! Statically typed binding to the Crypto Mania NFT contract.
//!
//! # Responsibilities
//! - Declare the fixed contract interface once (`sol!`), so a call that does
//!   not match it fails to compile
//! - Split the surface into read handles and signing handles
//! - Submit writes and wait until they are mined

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::{address, uint, Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder};
use alloy::sol;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::chain::types::{ChainId, ContractRef, MintError, MintResult, TxOutcome};

sol! {
    /// Public surface of the deployed Crypto Mania contract.
    #[sol(rpc)]
    interface ICryptoMania {
        function tokenIds() external view returns (uint256);
        function owner() external view returns (address);
        function presaleStarted() external view returns (bool);
        /// Unix timestamp (seconds) at which the presale closes.
        function presaleEnded() external view returns (uint256);
        function presaleMint() external payable;
        function mint() external payable;
        function startPresale() external;
    }
}

/// Display name of the collection.
pub const COLLECTION_NAME: &str = "Crypto Mania";

/// Total number of tokens the contract will ever mint.
pub const MAX_SUPPLY: u64 = 20;

/// Goerli. Any other network is rejected on connect.
pub const TARGET_CHAIN_ID: ChainId = ChainId(5);

/// Presale mint price: 0.005 ether.
pub const PRESALE_PRICE: U256 = uint!(5_000_000_000_000_000_U256);

/// Public mint price: 0.01 ether.
pub const PUBLIC_PRICE: U256 = uint!(10_000_000_000_000_000_U256);

/// Address of the deployed contract unless the config names another one.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("0x5c9a3f1b8e2d4c6a7f0b1e3d5a2c4b6e8f0a1c3d");

/// Reference to the deployed contract on the target network.
pub fn contract_ref(address: Address) -> ContractRef {
    ContractRef {
        address,
        chain_id: TARGET_CHAIN_ID,
    }
}

/// Read-only view of the contract.
#[async_trait]
pub trait MintReader: Send + Sync {
    /// Number of tokens minted so far.
    async fn token_ids(&self) -> MintResult<U256>;

    /// Contract owner.
    async fn owner(&self) -> MintResult<Address>;

    /// Whether the owner has opened the presale.
    async fn presale_started(&self) -> MintResult<bool>;

    /// Unix time at which the presale closes.
    async fn presale_end_time(&self) -> MintResult<U256>;
}

/// Signing handle to the contract. Every call returns once the transaction is mined.
#[async_trait]
pub trait MintWriter: Send + Sync {
    /// Whitelisted mint during the presale window.
    async fn presale_mint(&self, value: U256) -> MintResult<TxOutcome>;

    /// Public mint after the presale has ended.
    async fn mint(&self, value: U256) -> MintResult<TxOutcome>;

    /// Owner-only: open the presale window.
    async fn start_presale(&self) -> MintResult<TxOutcome>;
}

/// alloy-backed contract handle.
#[derive(Clone)]
pub struct NftContract {
    instance: ICryptoMania::ICryptoManiaInstance<DynProvider>,
    rpc_timeout: Duration,
    confirmations: u64,
}

impl NftContract {
    /// Bind the contract at `contract` through `provider`.
    pub fn new(
        contract: &ContractRef,
        provider: DynProvider,
        rpc_timeout: Duration,
        confirmations: u64,
    ) -> Self {
        Self {
            instance: ICryptoMania::new(contract.address, provider),
            rpc_timeout,
            confirmations,
        }
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn read<T, F>(&self, method: &'static str, call: F) -> MintResult<T>
    where
        F: IntoFuture<Output = Result<T, alloy::contract::Error>>,
    {
        match timeout(self.rpc_timeout, call.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(MintError::Read(format!("{}: {}", method, e))),
            Err(_) => Err(MintError::Read(format!(
                "{}: timed out after {} seconds",
                method,
                self.rpc_timeout.as_secs()
            ))),
        }
    }

    /// Wait until a submitted transaction is mined. Not bounded by the RPC timeout.
    async fn confirm(
        &self,
        method: &'static str,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> MintResult<TxOutcome> {
        let tx_hash = *pending.tx_hash();
        tracing::info!(method, tx_hash = %tx_hash, "Transaction submitted, waiting for confirmation");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| MintError::Transaction(format!("{}: {}", method, e)))?;

        if !receipt.status() {
            return Err(MintError::Transaction(format!(
                "{} reverted in transaction {}",
                method, tx_hash
            )));
        }

        tracing::info!(
            method,
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            "Transaction confirmed"
        );

        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

fn submit_error(method: &str, e: alloy::contract::Error) -> MintError {
    MintError::Transaction(format!("{}: {}", method, e))
}

#[async_trait]
impl MintReader for NftContract {
    async fn token_ids(&self) -> MintResult<U256> {
        let call = self.instance.tokenIds();
        self.read("tokenIds", call.call()).await
    }

    async fn owner(&self) -> MintResult<Address> {
        let call = self.instance.owner();
        self.read("owner", call.call()).await
    }

    async fn presale_started(&self) -> MintResult<bool> {
        let call = self.instance.presaleStarted();
        self.read("presaleStarted", call.call()).await
    }

    async fn presale_end_time(&self) -> MintResult<U256> {
        let call = self.instance.presaleEnded();
        self.read("presaleEnded", call.call()).await
    }
}

#[async_trait]
impl MintWriter for NftContract {
    async fn presale_mint(&self, value: U256) -> MintResult<TxOutcome> {
        let pending = self
            .instance
            .presaleMint()
            .value(value)
            .send()
            .await
            .map_err(|e| submit_error("presaleMint", e))?;
        self.confirm("presaleMint", pending).await
    }

    async fn mint(&self, value: U256) -> MintResult<TxOutcome> {
        let pending = self
            .instance
            .mint()
            .value(value)
            .send()
            .await
            .map_err(|e| submit_error("mint", e))?;
        self.confirm("mint", pending).await
    }

    async fn start_presale(&self) -> MintResult<TxOutcome> {
        let pending = self
            .instance
            .startPresale()
            .send()
            .await
            .map_err(|e| submit_error("startPresale", e))?;
        self.confirm("startPresale", pending).await
    }
}

impl std::fmt::Debug for NftContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftContract")
            .field("address", &self.address())
            .field("rpc_timeout_secs", &self.rpc_timeout.as_secs())
            .field("confirmations", &self.confirmations)
            .finish()
    }
}
