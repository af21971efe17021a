//! Text rendering of the mint page.

use std::fmt;

use serde::Serialize;

use crate::chain::contract::{COLLECTION_NAME, MAX_SUPPLY};
use crate::presentation::mode::{Action, RenderMode};
use crate::session::MintStatus;

/// One rendered frame of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct View {
    pub status: MintStatus,
    pub mode: RenderMode,
    pub action: Option<Action>,
}

impl View {
    pub fn new(status: MintStatus) -> Self {
        let mode = RenderMode::from_status(&status);
        Self {
            status,
            mode,
            action: mode.action(),
        }
    }

    fn message(&self) -> Option<&'static str> {
        match self.mode {
            RenderMode::Disconnected | RenderMode::OwnerPresaleNotStarted => None,
            RenderMode::Loading => Some("Loading..."),
            RenderMode::PresaleNotStarted => Some("Presale has not started yet"),
            RenderMode::PresaleActive => Some("Presale has started! Whitelisted addresses only."),
            RenderMode::PresaleEndedPublicMint => {
                Some("Presale has ended. Public mint is open while supply remains.")
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome to {} NFT", COLLECTION_NAME)?;
        writeln!(f, "{} is for onboarding web2 people to web3", COLLECTION_NAME)?;
        writeln!(
            f,
            "{}/{} have been minted already",
            self.status.minted_count, MAX_SUPPLY
        )?;
        if let Some(message) = self.message() {
            writeln!(f, "{}", message)?;
        }
        if let Some(action) = self.action {
            writeln!(f, "[Enter] {}", action.label())?;
        }
        Ok(())
    }
}
