//! Shared utilities for integration tests: a programmable in-memory chain.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use cryptomania_mint::chain::contract::{contract_ref, MintReader, MintWriter, DEFAULT_CONTRACT_ADDRESS};
use cryptomania_mint::chain::{ChainId, ContractRef, MintError, MintResult, TxOutcome};
use cryptomania_mint::session::WalletBridge;
use cryptomania_mint::MintController;

pub const ACCOUNT: Address = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const OTHER: Address = address!("0x70997970c51812dc3a010c7d01b50e0d17dc79c8");

/// On-chain state plus failure switches.
pub struct FakeChain {
    pub chain_id: AtomicU64,
    pub can_sign: bool,
    pub owner: Mutex<Address>,
    pub minted: AtomicU64,
    pub presale_started: AtomicBool,
    pub presale_end: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_end_time: AtomicBool,
    pub fail_writes: AtomicBool,
    pub hold_writes: AtomicBool,
    pub release_writes: Notify,
    pub readers_built: AtomicU32,
    pub writes: Mutex<Vec<(&'static str, U256)>>,
}

impl FakeChain {
    pub fn new(can_sign: bool) -> Arc<Self> {
        Arc::new(Self {
            chain_id: AtomicU64::new(5),
            can_sign,
            owner: Mutex::new(OTHER),
            minted: AtomicU64::new(0),
            presale_started: AtomicBool::new(false),
            presale_end: AtomicU64::new(0),
            fail_reads: AtomicBool::new(false),
            fail_end_time: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            hold_writes: AtomicBool::new(false),
            release_writes: Notify::new(),
            readers_built: AtomicU32::new(0),
            writes: Mutex::new(Vec::new()),
        })
    }

    pub fn writes(&self) -> Vec<(&'static str, U256)> {
        self.writes.lock().unwrap().clone()
    }

    fn check_read(&self, what: &str) -> MintResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(MintError::Read(format!("{}: injected failure", what)))
        } else {
            Ok(())
        }
    }

    async fn write(&self, method: &'static str, value: U256) -> MintResult<TxOutcome> {
        if self.hold_writes.load(Ordering::SeqCst) {
            self.release_writes.notified().await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MintError::Transaction(format!("{}: execution reverted", method)));
        }
        let mut writes = self.writes.lock().unwrap();
        writes.push((method, value));
        let n = writes.len() as u64;
        Ok(TxOutcome {
            tx_hash: B256::with_last_byte(n as u8),
            block_number: Some(100 + n),
        })
    }
}

/// Wallet + contract handles over a [`FakeChain`].
#[derive(Clone)]
pub struct FakeWallet(pub Arc<FakeChain>);

#[async_trait]
impl WalletBridge for FakeWallet {
    async fn chain_id(&self) -> MintResult<ChainId> {
        Ok(ChainId(self.0.chain_id.load(Ordering::SeqCst)))
    }

    fn account(&self) -> Option<Address> {
        self.0.can_sign.then_some(ACCOUNT)
    }

    fn reader(&self, _contract: &ContractRef) -> Arc<dyn MintReader> {
        self.0.readers_built.fetch_add(1, Ordering::SeqCst);
        Arc::new(self.clone())
    }

    fn signer(&self, _contract: &ContractRef) -> Option<Arc<dyn MintWriter>> {
        self.0.can_sign.then(|| Arc::new(self.clone()) as Arc<dyn MintWriter>)
    }
}

#[async_trait]
impl MintReader for FakeWallet {
    async fn token_ids(&self) -> MintResult<U256> {
        self.0.check_read("tokenIds")?;
        Ok(U256::from(self.0.minted.load(Ordering::SeqCst)))
    }

    async fn owner(&self) -> MintResult<Address> {
        self.0.check_read("owner")?;
        Ok(*self.0.owner.lock().unwrap())
    }

    async fn presale_started(&self) -> MintResult<bool> {
        self.0.check_read("presaleStarted")?;
        Ok(self.0.presale_started.load(Ordering::SeqCst))
    }

    async fn presale_end_time(&self) -> MintResult<U256> {
        self.0.check_read("presaleEnded")?;
        if self.0.fail_end_time.load(Ordering::SeqCst) {
            return Err(MintError::Read("presaleEnded: injected failure".into()));
        }
        Ok(U256::from(self.0.presale_end.load(Ordering::SeqCst)))
    }
}

#[async_trait]
impl MintWriter for FakeWallet {
    async fn presale_mint(&self, value: U256) -> MintResult<TxOutcome> {
        let outcome = self.0.write("presaleMint", value).await?;
        self.0.minted.fetch_add(1, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn mint(&self, value: U256) -> MintResult<TxOutcome> {
        let outcome = self.0.write("mint", value).await?;
        self.0.minted.fetch_add(1, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn start_presale(&self) -> MintResult<TxOutcome> {
        let outcome = self.0.write("startPresale", U256::ZERO).await?;
        self.0.presale_started.store(true, Ordering::SeqCst);
        self.0.presale_end.store(u64::MAX, Ordering::SeqCst);
        Ok(outcome)
    }
}

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub fn target() -> ContractRef {
    contract_ref(DEFAULT_CONTRACT_ADDRESS)
}

/// Controller wired to `chain`.
pub fn controller(chain: &Arc<FakeChain>) -> MintController {
    MintController::new(Arc::new(FakeWallet(chain.clone())), target(), POLL_INTERVAL)
}
