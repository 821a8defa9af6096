pub mod classifier;
mod errors;
pub mod handlers;
pub mod models;
pub mod service;

pub use classifier::{classify, Outcome};
pub use errors::SyncError;
pub use models::{SyncReport, SyncRequest, SyncSummary};
pub use service::ArchiveSynchronizer;

/// Months scanned when the caller does not say otherwise
pub const DEFAULT_SYNC_MONTHS: usize = 6;
