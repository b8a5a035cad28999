//! PostgreSQL persistence for pulse monitoring.
//!
//! Holds the connection pool helpers, embedded migrations, the row models,
//! the repositories and the adapters that expose them through the store
//! traits of `pulse_core`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{PgAbnormalStore, PgObservationStore};

pub type DbPool = sqlx::PgPool;

/// How long a caller waits for a pooled connection before the query fails.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
///
/// Connections are opened on first use, so an unreachable database does not
/// fail startup; it surfaces later as a query error that callers degrade on.
pub fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}

/// Run a trivial query to verify the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Check whether `table` exists in the current search path.
pub async fn table_exists(pool: &DbPool, table: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(table)
        .fetch_one(pool)
        .await
}
