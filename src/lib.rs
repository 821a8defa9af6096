// Library crate for the chess win/loss tracker
// This file exposes the public API for integration tests

pub mod chesscom;
pub mod config;
pub mod db;
pub mod matches;
pub mod routes;
pub mod shared;
pub mod sync;

// Re-export commonly used types for easier access in tests
pub use chesscom::{ArchiveSource, ChessComClient, GameRecord, MonthlyArchive, RemoteError};
pub use matches::{
    InMemoryMatchRepository, MatchOutcome, MatchRecord, MatchRepository, MatchService, NewMatch,
    StoreError,
};
pub use routes::create_routes;
pub use shared::{AppError, AppState};
pub use sync::{classify, ArchiveSynchronizer, Outcome, SyncError, SyncSummary};
