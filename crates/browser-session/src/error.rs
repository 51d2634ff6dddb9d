//! Session error types

use browser_state::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Restoring requires at least one session
    #[error("snapshot does not contain any sessions")]
    EmptySnapshot,

    #[error("no session with id {0}")]
    UnknownSession(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid session snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}
