//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The target network and the mint prices are NOT configurable; they are
//! fixed in [`crate::chain::contract`].

use serde::{Deserialize, Serialize};

use crate::chain::contract::DEFAULT_CONTRACT_ADDRESS;

/// Root configuration for the mint client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintConfig {
    /// Node connection settings.
    pub network: NetworkConfig,

    /// Deployed contract settings.
    pub contract: ContractConfig,

    /// Status polling settings.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Timeout for contract reads and network identification, in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of blocks a write waits for before it counts as confirmed.
    pub confirmations: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            rpc_timeout_secs: 10,
            confirmations: 1,
        }
    }
}

/// Deployed contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the Crypto Mania contract (hex, 0x-prefixed).
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        }
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between two refreshes of the same piece of state.
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
