//! Engine error types

use thiserror::Error;

/// Errors reported by engine session operations
///
/// These never cross the middleware boundary. Whoever awaits an engine call
/// is expected to log or otherwise handle the error on the spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The session was closed and cannot be used anymore
    #[error("engine session {0} is closed")]
    SessionClosed(u64),

    /// The session crashed and needs to be recovered first
    #[error("engine session {0} crashed")]
    SessionCrashed(u64),

    /// Navigating to the given history index is not possible
    #[error("history index {index} out of range (history length {len})")]
    InvalidHistoryIndex { index: usize, len: usize },

    /// The engine rejected the url
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
