//! Database connection pool management.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_MATCH_RECORDS: &str = "CREATE TABLE IF NOT EXISTS match_records (
    id BIGSERIAL PRIMARY KEY,
    opponent TEXT,
    outcome TEXT NOT NULL CHECK (outcome IN ('Won', 'Lost')),
    date TEXT
)";

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .test_before_acquire(true)
        .connect(database_url)
        .await
}

/// Create the match table if this is a fresh database.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MATCH_RECORDS).execute(pool).await?;
    info!("match_records table ready");
    Ok(())
}
