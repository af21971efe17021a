//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, at least one confirmation)
//! - Check that the RPC URL and contract address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MintConfig → Result<(), Vec<ValidationError>>

use alloy::primitives::Address;

use crate::config::schema::MintConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const RPC_SCHEMES: [&str; 2] = ["http", "https"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.network.rpc_url) {
        Ok(url) if !RPC_SCHEMES.contains(&url.scheme()) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("network.rpc_url", e.to_string())),
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }

    if config.network.confirmations == 0 {
        errors.push(ValidationError::new("network.confirmations", "must be at least 1"));
    }

    if let Err(e) = config.contract.address.parse::<Address>() {
        errors.push(ValidationError::new("contract.address", e.to_string()));
    }

    if config.polling.interval_secs == 0 {
        errors.push(ValidationError::new("polling.interval_secs", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
