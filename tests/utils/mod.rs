pub mod game_builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use game_builders::{month_url, GameBuilder, MARCH_15_2024, ONE_DAY};
#[allow(unused_imports)]
pub use mocks::{FailingMatchRepository, MockArchiveSource};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
