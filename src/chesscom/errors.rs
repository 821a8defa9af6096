use thiserror::Error;

/// Failures talking to the Chess.com public API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("request rejected with status {status}: {url}")]
    Rejected { status: u16, url: String },

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
