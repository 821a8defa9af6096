pub use client::{ArchiveSource, ChessComClient, ChessComConfig};
pub use errors::RemoteError;
pub use models::{ArchiveIndex, GameRecord, MonthlyArchive, PlayerSide};

pub mod client;
mod errors;
pub mod models;
