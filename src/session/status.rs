//! Derived mint status.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::U256;
use serde::Serialize;

/// Everything the presentation layer needs to pick a render mode.
///
/// `presale_ended` only means something once `presale_started` is true, and
/// `is_owner` only once `wallet_connected` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MintStatus {
    pub wallet_connected: bool,
    pub is_owner: bool,
    pub presale_started: bool,
    pub presale_ended: bool,
    pub minted_count: u64,
    pub loading: bool,
}

/// The presale is over once its end time is reached, boundary included.
pub fn presale_has_ended(end_time: U256, now: u64) -> bool {
    end_time <= U256::from(now)
}

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
