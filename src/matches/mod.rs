// Public API - what other modules can use
pub use errors::StoreError;
pub use models::{DedupKey, MatchOutcome, MatchRecord, MatchTotals, MatchUpdate, NewMatch};
pub use repository::{
    InMemoryMatchRepository, MatchBatch, MatchRepository, PostgresMatchRepository,
};
pub use service::MatchService;

mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
