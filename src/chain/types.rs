//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable reference to the deployed mint contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractRef {
    /// Deployed contract address.
    pub address: Address,
    /// Network the contract lives on.
    pub chain_id: ChainId,
}

/// Errors surfaced by the mint session.
#[derive(Debug, Error)]
pub enum MintError {
    /// Wallet is connected to a network other than the target.
    #[error("Wrong network: expected chain {expected}, wallet is on chain {actual}")]
    NetworkMismatch { expected: u64, actual: u64 },

    /// The wallet exposes no signing capability.
    #[error("Wallet has no signer available")]
    SignerUnavailable,

    /// Submission or confirmation of a transaction failed.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// A contract read failed.
    #[error("Read failed: {0}")]
    Read(String),

    /// The wallet could not be reached at all.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The configured signing key is malformed.
    #[error("Invalid signing key: {0}")]
    Key(String),

    /// Another transaction from this session has not been mined yet.
    #[error("Another transaction is still pending")]
    WriteInProgress,
}

impl MintError {
    /// Whether the error should be shown to the user rather than only logged.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, MintError::Read(_))
    }
}

/// Result type for mint operations.
pub type MintResult<T> = Result<T, MintError>;

/// A confirmed (mined) transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Hash of the mined transaction.
    pub tx_hash: TxHash,
    /// Block the transaction was included in, when the node reports it.
    pub block_number: Option<u64>,
}
