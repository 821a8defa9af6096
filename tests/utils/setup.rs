#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use chess_tally::{
    matches::{InMemoryMatchRepository, MatchRepository, NewMatch},
    sync::ArchiveSynchronizer,
    AppState,
};

use super::mocks::MockArchiveSource;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub player: String,
    pub source: Arc<MockArchiveSource>,
    pub repository: Arc<InMemoryMatchRepository>,
    pub synchronizer: Arc<ArchiveSynchronizer>,
}

impl TestSetup {
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.repository.clone(),
            Arc::clone(&self.synchronizer),
            6,
        )
    }
}

pub struct TestSetupBuilder {
    player: String,
    existing: Vec<NewMatch>,
    repository: Option<Arc<dyn MatchRepository>>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            player: "alice".to_string(),
            existing: vec![],
            repository: None,
        }
    }

    pub fn with_player(mut self, player: &str) -> Self {
        self.player = player.to_string();
        self
    }

    /// Records already in the store before the first sync
    pub fn with_existing_matches(mut self, existing: Vec<NewMatch>) -> Self {
        self.existing = existing;
        self
    }

    /// Sync against this repository instead of the in-memory one; the
    /// in-memory repository in `TestSetup` is then unused by the synchronizer
    pub fn with_repository(mut self, repository: Arc<dyn MatchRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> TestSetup {
        let source = Arc::new(MockArchiveSource::new());
        let repository = Arc::new(InMemoryMatchRepository::with_matches(self.existing));
        let sync_repository: Arc<dyn MatchRepository> = self
            .repository
            .unwrap_or_else(|| repository.clone());

        let synchronizer = Arc::new(ArchiveSynchronizer::new(
            source.clone(),
            sync_repository,
        ));

        TestSetup {
            player: self.player,
            source,
            repository,
            synchronizer,
        }
    }
}
