#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use chess_tally::{
    chesscom::{ArchiveSource, GameRecord, MonthlyArchive, RemoteError},
    matches::{
        DedupKey, InMemoryMatchRepository, MatchBatch, MatchOutcome, MatchRecord,
        MatchRepository, NewMatch, StoreError,
    },
};

// ============================================================================
// Mock Chess.com
// ============================================================================

#[derive(Clone)]
pub struct MockArchiveSource {
    index: Arc<RwLock<Result<Vec<String>, RemoteError>>>,
    months: Arc<RwLock<HashMap<String, Result<Vec<GameRecord>, RemoteError>>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockArchiveSource {
    pub fn new() -> Self {
        Self {
            index: Arc::new(RwLock::new(Ok(Vec::new()))),
            months: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Appends a month to the index, newest last
    pub async fn add_month(&self, locator: &str, games: Vec<GameRecord>) {
        if let Ok(index) = &mut *self.index.write().await {
            index.push(locator.to_string());
        }
        self.months
            .write()
            .await
            .insert(locator.to_string(), Ok(games));
    }

    pub async fn fail_index(&self, error: RemoteError) {
        *self.index.write().await = Err(error);
    }

    pub async fn fail_month(&self, locator: &str, error: RemoteError) {
        self.months
            .write()
            .await
            .insert(locator.to_string(), Err(error));
    }

    /// Every request made so far, in order ("index:<player>" or the locator)
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl ArchiveSource for MockArchiveSource {
    async fn archive_index(&self, player_id: &str) -> Result<Vec<String>, RemoteError> {
        self.requests
            .write()
            .await
            .push(format!("index:{player_id}"));
        self.index.read().await.clone()
    }

    async fn monthly_archive(&self, locator: &str) -> Result<MonthlyArchive, RemoteError> {
        self.requests.write().await.push(locator.to_string());
        match self.months.read().await.get(locator) {
            Some(Ok(games)) => Ok(MonthlyArchive {
                games: games.clone(),
            }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(RemoteError::NotFound(locator.to_string())),
        }
    }
}

// ============================================================================
// Store that fails on demand
// ============================================================================

/// Wraps the in-memory store; batches fail after a number of inserts or at
/// commit time, the way a dropped database connection would.
pub struct FailingMatchRepository {
    inner: InMemoryMatchRepository,
    fail_after_inserts: Option<usize>,
    fail_on_commit: bool,
}

impl FailingMatchRepository {
    pub fn failing_after_inserts(inner: InMemoryMatchRepository, inserts: usize) -> Self {
        Self {
            inner,
            fail_after_inserts: Some(inserts),
            fail_on_commit: false,
        }
    }

    pub fn failing_on_commit(inner: InMemoryMatchRepository) -> Self {
        Self {
            inner,
            fail_after_inserts: None,
            fail_on_commit: true,
        }
    }
}

#[async_trait]
impl MatchRepository for FailingMatchRepository {
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        self.inner.insert_match(new_match).await
    }

    async fn get_match(&self, id: i64) -> Result<Option<MatchRecord>, StoreError> {
        self.inner.get_match(id).await
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        self.inner.list_matches().await
    }

    async fn update_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        self.inner.update_match(record).await
    }

    async fn delete_match(&self, id: i64) -> Result<(), StoreError> {
        self.inner.delete_match(id).await
    }

    async fn count_by_outcome(&self, outcome: MatchOutcome) -> Result<u64, StoreError> {
        self.inner.count_by_outcome(outcome).await
    }

    async fn exists_match(&self, key: &DedupKey) -> Result<bool, StoreError> {
        self.inner.exists_match(key).await
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        self.inner.reset_all().await
    }

    async fn begin_batch(&self) -> Result<Box<dyn MatchBatch>, StoreError> {
        Ok(Box::new(FailingMatchBatch {
            inner: self.inner.begin_batch().await?,
            inserts_left: self.fail_after_inserts,
            fail_on_commit: self.fail_on_commit,
        }))
    }
}

struct FailingMatchBatch {
    inner: Box<dyn MatchBatch>,
    inserts_left: Option<usize>,
    fail_on_commit: bool,
}

#[async_trait]
impl MatchBatch for FailingMatchBatch {
    async fn exists_match(&mut self, key: &DedupKey) -> Result<bool, StoreError> {
        self.inner.exists_match(key).await
    }

    async fn insert_match(&mut self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        match self.inserts_left {
            Some(0) => Err(StoreError::Database("connection reset by peer".to_string())),
            Some(ref mut left) => {
                *left -= 1;
                self.inner.insert_match(new_match).await
            }
            None => self.inner.insert_match(new_match).await,
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        if self.fail_on_commit {
            let this = *self;
            this.inner.rollback().await?;
            return Err(StoreError::Database("commit failed".to_string()));
        }
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.rollback().await
    }
}
