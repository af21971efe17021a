//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variable (private key)  +  config (RPC URL)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC wallet bridge: network id, providers)
//!     → contract.rs (typed contract calls, submit + confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC reads have configurable timeouts

pub mod client;
pub mod contract;
pub mod types;
pub mod wallet;

pub use client::RpcWallet;
pub use contract::{MintReader, MintWriter, NftContract};
pub use types::{ChainId, ContractRef, MintError, MintResult, TxOutcome};
pub use wallet::Wallet;
