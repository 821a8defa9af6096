use thiserror::Error;

use crate::chesscom::RemoteError;
use crate::matches::StoreError;

/// Why a sync pass was aborted. A pass that inserts nothing is not an error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Unknown player; retrying will not help until the id is corrected
    #[error("Chess.com has no player or archive at {0}")]
    RemoteNotFound(String),

    /// Chess.com refused the request (policy or rate limit)
    #[error("Chess.com rejected the request: {0}")]
    RemoteRejected(String),

    #[error("Chess.com is unavailable: {0}")]
    RemoteUnavailable(String),

    /// The pass was rolled back; nothing from it was kept
    #[error("Failed to persist synchronized matches: {0}")]
    PersistenceFailure(String),
}

impl SyncError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SyncError::RemoteNotFound(_))
    }
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(what) => SyncError::RemoteNotFound(what),
            rejected @ RemoteError::Rejected { .. } => {
                SyncError::RemoteRejected(rejected.to_string())
            }
            RemoteError::Unavailable(reason) => SyncError::RemoteUnavailable(reason),
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::PersistenceFailure(err.to_string())
    }
}
