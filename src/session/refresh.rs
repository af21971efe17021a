//! Best-effort status reads.
//!
//! Every refresh goes through [`ConnectionManager::connect`], so a wallet that
//! has switched networks is noticed on the next read. A failed read is logged
//! and leaves the published status untouched.

use std::sync::Arc;

use tokio::sync::watch;

use crate::chain::types::{MintError, MintResult};
use crate::session::connection::ConnectionManager;
use crate::session::status::{presale_has_ended, unix_now, MintStatus};

/// Pulls contract state into the shared [`MintStatus`].
#[derive(Clone)]
pub struct StatusSync {
    connection: Arc<ConnectionManager>,
    status: Arc<watch::Sender<MintStatus>>,
}

impl StatusSync {
    pub fn new(connection: Arc<ConnectionManager>, status: Arc<watch::Sender<MintStatus>>) -> Self {
        Self { connection, status }
    }

    /// Refresh the number of minted tokens.
    pub async fn refresh_minted_count(&self) -> MintResult<u64> {
        let result = async {
            let session = self.connection.connect(false).await?;
            let minted = session.reader().token_ids().await?;
            Ok::<_, MintError>(minted.saturating_to::<u64>())
        }
        .await;

        match result {
            Ok(minted) => {
                self.status.send_if_modified(|s| replace(&mut s.minted_count, minted));
                Ok(minted)
            }
            Err(e) => Err(log_read_failure("minted count", e)),
        }
    }

    /// Refresh whether the presale started and, once started, whether it ended.
    ///
    /// Both values are read before either is published.
    pub async fn refresh_presale_status(&self) -> MintResult<bool> {
        let result = async {
            let session = self.connection.connect(false).await?;
            let started = session.reader().presale_started().await?;
            let ended = if started {
                let end_time = session.reader().presale_end_time().await?;
                Some(presale_has_ended(end_time, unix_now()))
            } else {
                None
            };
            Ok::<_, MintError>((started, ended))
        }
        .await;

        match result {
            Ok((started, ended)) => {
                self.status.send_if_modified(|s| {
                    let mut changed = replace(&mut s.presale_started, started);
                    if let Some(ended) = ended {
                        changed |= replace(&mut s.presale_ended, ended);
                    }
                    changed
                });
                Ok(started)
            }
            Err(e) => Err(log_read_failure("presale status", e)),
        }
    }

    /// Refresh whether the signing account owns the contract.
    pub async fn refresh_owner(&self) -> MintResult<bool> {
        let result = async {
            let session = self.connection.connect(true).await?;
            let account = session.account().ok_or(MintError::SignerUnavailable)?;
            let owner = session.reader().owner().await?;
            Ok::<_, MintError>(owner == account)
        }
        .await;

        match result {
            Ok(is_owner) => {
                self.status.send_if_modified(|s| replace(&mut s.is_owner, is_owner));
                Ok(is_owner)
            }
            Err(e) => Err(log_read_failure("owner", e)),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn log_read_failure(what: &'static str, e: MintError) -> MintError {
    tracing::error!(read = what, error = %e, "Status read failed, keeping previous value");
    e
}
