//! Crypto Mania mint client.
//!
//! Connects a wallet to the Crypto Mania NFT contract, polls the mint state
//! and drives the mint page's state machine.

pub mod chain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod presentation;
pub mod session;

pub use config::MintConfig;
pub use presentation::{Action, RenderMode, View};
pub use session::{MintController, MintStatus};
