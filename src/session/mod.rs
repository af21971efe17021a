//! Mint session subsystem.
//!
//! # Data Flow
//! ```text
//! WalletBridge (wallet: network id, read/sign handles)
//!     → connection.rs (network check, cached Session)
//!     → refresh.rs (best-effort reads → MintStatus)
//!     → poller.rs (two periodic refresh tasks)
//!     → controller.rs (page load, user actions, teardown)
//!     → watch::Receiver<MintStatus> (presentation layer)
//! ```

pub mod connection;
pub mod controller;
pub mod poller;
pub mod refresh;
pub mod status;

pub use connection::{ConnectionManager, Session, SessionAlert, WalletBridge};
pub use controller::MintController;
pub use poller::Poller;
pub use status::{presale_has_ended, MintStatus};
