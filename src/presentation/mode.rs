//! Render-mode selection.

use serde::Serialize;

use crate::session::MintStatus;

/// The six mutually exclusive page states, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Disconnected,
    Loading,
    OwnerPresaleNotStarted,
    PresaleNotStarted,
    PresaleActive,
    PresaleEndedPublicMint,
}

/// Something the user can trigger from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Connect,
    StartPresale,
    MintPresale,
    MintPublic,
}

impl RenderMode {
    /// Pick the render mode for `status`. Pure and total.
    pub fn from_status(status: &MintStatus) -> Self {
        if !status.wallet_connected {
            RenderMode::Disconnected
        } else if status.loading {
            RenderMode::Loading
        } else if status.is_owner && !status.presale_started {
            RenderMode::OwnerPresaleNotStarted
        } else if !status.presale_started {
            RenderMode::PresaleNotStarted
        } else if !status.presale_ended {
            RenderMode::PresaleActive
        } else {
            RenderMode::PresaleEndedPublicMint
        }
    }

    /// The action offered in this mode, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            RenderMode::Disconnected => Some(Action::Connect),
            RenderMode::Loading | RenderMode::PresaleNotStarted => None,
            RenderMode::OwnerPresaleNotStarted => Some(Action::StartPresale),
            RenderMode::PresaleActive => Some(Action::MintPresale),
            RenderMode::PresaleEndedPublicMint => Some(Action::MintPublic),
        }
    }
}

impl Action {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Connect => "Connect Wallet",
            Action::StartPresale => "Start Presale",
            Action::MintPresale => "Presale Mint",
            Action::MintPublic => "Public Mint",
        }
    }
}
