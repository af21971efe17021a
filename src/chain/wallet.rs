//! Signing key loading.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::chain::types::{ChainId, MintError, MintResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CRYPTOMANIA_PRIVATE_KEY";

/// Local signing key bound to one chain.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string (with or without 0x).
    pub fn from_private_key(private_key_hex: &str, chain_id: ChainId) -> MintResult<Self> {
        let key_hex = private_key_hex
            .trim()
            .strip_prefix("0x")
            .unwrap_or(private_key_hex.trim());

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| MintError::Key(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id.0));

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id.0,
            "Wallet signer loaded"
        );

        Ok(Self { signer })
    }

    /// Load the wallet from `CRYPTOMANIA_PRIVATE_KEY`.
    ///
    /// Returns `Ok(None)` when the variable is unset: the session is then read-only.
    pub fn from_env(chain_id: ChainId) -> MintResult<Option<Self>> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Self::from_private_key(&key, chain_id).map(Some),
            _ => {
                tracing::info!(
                    env_var = PRIVATE_KEY_ENV_VAR,
                    "No signing key configured, session will be read-only"
                );
                Ok(None)
            }
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Network wallet used by the provider's signing filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
