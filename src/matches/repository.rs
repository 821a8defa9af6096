use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{DedupKey, MatchOutcome, MatchRecord, NewMatch};
use super::StoreError;

/// Storage port for match records
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, StoreError>;
    async fn get_match(&self, id: i64) -> Result<Option<MatchRecord>, StoreError>;
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StoreError>;
    async fn update_match(&self, record: &MatchRecord) -> Result<(), StoreError>;
    async fn delete_match(&self, id: i64) -> Result<(), StoreError>;
    async fn count_by_outcome(&self, outcome: MatchOutcome) -> Result<u64, StoreError>;
    async fn exists_match(&self, key: &DedupKey) -> Result<bool, StoreError>;
    /// Deletes every record and restarts id assignment at 1
    async fn reset_all(&self) -> Result<(), StoreError>;
    /// Opens a transaction scope; nothing written through it is visible
    /// outside until `commit`.
    async fn begin_batch(&self) -> Result<Box<dyn MatchBatch>, StoreError>;
}

/// A single transaction over the match table.
///
/// Reads observe the rows written earlier in the same batch. Dropping a batch
/// without committing discards its writes.
#[async_trait]
pub trait MatchBatch: Send {
    async fn exists_match(&mut self, key: &DedupKey) -> Result<bool, StoreError>;
    async fn insert_match(&mut self, new_match: &NewMatch) -> Result<MatchRecord, StoreError>;
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct MatchTable {
    rows: BTreeMap<i64, MatchRecord>,
    next_id: i64,
}

impl MatchTable {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, new_match: &NewMatch) -> MatchRecord {
        let record = new_match.clone().into_record(self.next_id);
        self.next_id += 1;
        self.rows.insert(record.id, record.clone());
        record
    }

    fn contains_key(&self, key: &DedupKey) -> bool {
        self.rows.values().any(|record| record.dedup_key() == *key)
    }
}

/// In-memory implementation of MatchRepository for development and testing
///
/// Batches hold the table lock for their whole lifetime and work on a staged
/// copy, which replaces the table on commit.
#[derive(Debug, Clone)]
pub struct InMemoryMatchRepository {
    table: Arc<Mutex<MatchTable>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(MatchTable::new())),
        }
    }

    /// Creates a repository pre-populated with the given matches, ids from 1
    pub fn with_matches(matches: Vec<NewMatch>) -> Self {
        let mut table = MatchTable::new();
        for new_match in &matches {
            table.insert(new_match);
        }
        Self {
            table: Arc::new(Mutex::new(table)),
        }
    }

    pub async fn match_count(&self) -> usize {
        self.table.lock().await.rows.len()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, new_match))]
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        let record = self.table.lock().await.insert(new_match);
        debug!(match_id = record.id, outcome = %record.outcome, "Match inserted in memory");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get_match(&self, id: i64) -> Result<Option<MatchRecord>, StoreError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    #[instrument(skip(self, record))]
    async fn update_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                debug!(match_id = record.id, "Match updated in memory");
                Ok(())
            }
            None => {
                warn!(match_id = record.id, "Match not found for update in memory");
                Err(StoreError::NotFound(record.id))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, id: i64) -> Result<(), StoreError> {
        if self.table.lock().await.rows.remove(&id).is_none() {
            warn!(match_id = id, "Match not found for deletion in memory");
            return Err(StoreError::NotFound(id));
        }
        debug!(match_id = id, "Match deleted from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_outcome(&self, outcome: MatchOutcome) -> Result<u64, StoreError> {
        let table = self.table.lock().await;
        Ok(table.rows.values().filter(|r| r.outcome == outcome).count() as u64)
    }

    #[instrument(skip(self))]
    async fn exists_match(&self, key: &DedupKey) -> Result<bool, StoreError> {
        Ok(self.table.lock().await.contains_key(key))
    }

    #[instrument(skip(self))]
    async fn reset_all(&self) -> Result<(), StoreError> {
        *self.table.lock().await = MatchTable::new();
        debug!("Match table reset in memory");
        Ok(())
    }

    async fn begin_batch(&self) -> Result<Box<dyn MatchBatch>, StoreError> {
        let guard = Arc::clone(&self.table).lock_owned().await;
        let staged = (*guard).clone();
        Ok(Box::new(InMemoryMatchBatch { guard, staged }))
    }
}

pub struct InMemoryMatchBatch {
    guard: OwnedMutexGuard<MatchTable>,
    staged: MatchTable,
}

#[async_trait]
impl MatchBatch for InMemoryMatchBatch {
    async fn exists_match(&mut self, key: &DedupKey) -> Result<bool, StoreError> {
        Ok(self.staged.contains_key(key))
    }

    async fn insert_match(&mut self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        Ok(self.staged.insert(new_match))
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryMatchBatch { mut guard, staged } = *self;
        debug!(rows = staged.rows.len(), "Committing in-memory batch");
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        debug!("Discarding in-memory batch");
        Ok(())
    }
}

/// PostgreSQL implementation of match repository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, opponent, outcome, date FROM match_records";
const EXISTS_QUERY: &str = "SELECT EXISTS(SELECT 1 FROM match_records WHERE opponent IS NOT DISTINCT FROM $1 AND outcome = $2 AND date IS NOT DISTINCT FROM $3)";
const INSERT_QUERY: &str =
    "INSERT INTO match_records (opponent, outcome, date) VALUES ($1, $2, $3) RETURNING id";

fn row_to_record(row: &PgRow) -> Result<MatchRecord, StoreError> {
    let raw_outcome: String = row.get("outcome");
    let outcome = raw_outcome.parse::<MatchOutcome>().map_err(|_| {
        StoreError::Database(format!("unexpected outcome value '{raw_outcome}' in match_records"))
    })?;

    Ok(MatchRecord {
        id: row.get("id"),
        opponent: row.get("opponent"),
        outcome,
        date: row.get("date"),
    })
}

fn log_failure(operation: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| {
        warn!(error = %e, operation, "Match store query failed");
        StoreError::from(e)
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    #[instrument(skip(self, new_match))]
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        let id: i64 = sqlx::query_scalar(INSERT_QUERY)
            .bind(&new_match.opponent)
            .bind(new_match.outcome.to_string())
            .bind(&new_match.date)
            .fetch_one(&self.pool)
            .await
            .map_err(log_failure("insert_match"))?;

        debug!(match_id = id, "Match inserted in database");
        Ok(new_match.clone().into_record(id))
    }

    #[instrument(skip(self))]
    async fn get_match(&self, id: i64) -> Result<Option<MatchRecord>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(log_failure("get_match"))?;

        row.as_ref().map(row_to_record).transpose()
    }

    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(log_failure("list_matches"))?;

        rows.iter().map(row_to_record).collect()
    }

    #[instrument(skip(self, record))]
    async fn update_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE match_records SET opponent = $2, outcome = $3, date = $4 WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.opponent)
        .bind(record.outcome.to_string())
        .bind(&record.date)
        .execute(&self.pool)
        .await
        .map_err(log_failure("update_match"))?;

        if result.rows_affected() == 0 {
            warn!(match_id = record.id, "Match not found for update");
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM match_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(log_failure("delete_match"))?;

        if result.rows_affected() == 0 {
            warn!(match_id = id, "Match not found for deletion");
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_outcome(&self, outcome: MatchOutcome) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM match_records WHERE outcome = $1")
            .bind(outcome.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(log_failure("count_by_outcome"))?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn exists_match(&self, key: &DedupKey) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(EXISTS_QUERY)
            .bind(&key.opponent)
            .bind(key.outcome.to_string())
            .bind(&key.date)
            .fetch_one(&self.pool)
            .await
            .map_err(log_failure("exists_match"))
    }

    #[instrument(skip(self))]
    async fn reset_all(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE TABLE match_records RESTART IDENTITY")
            .execute(&self.pool)
            .await
            .map_err(log_failure("reset_all"))?;

        debug!("Match table truncated and identity restarted");
        Ok(())
    }

    async fn begin_batch(&self) -> Result<Box<dyn MatchBatch>, StoreError> {
        let tx = self.pool.begin().await.map_err(log_failure("begin_batch"))?;
        Ok(Box::new(PostgresMatchBatch { tx }))
    }
}

pub struct PostgresMatchBatch {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MatchBatch for PostgresMatchBatch {
    async fn exists_match(&mut self, key: &DedupKey) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(EXISTS_QUERY)
            .bind(&key.opponent)
            .bind(key.outcome.to_string())
            .bind(&key.date)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(log_failure("batch_exists_match"))
    }

    async fn insert_match(&mut self, new_match: &NewMatch) -> Result<MatchRecord, StoreError> {
        let id: i64 = sqlx::query_scalar(INSERT_QUERY)
            .bind(&new_match.opponent)
            .bind(new_match.outcome.to_string())
            .bind(&new_match.date)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(log_failure("batch_insert_match"))?;

        Ok(new_match.clone().into_record(id))
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(log_failure("commit"))
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await.map_err(log_failure("rollback"))
    }
}
