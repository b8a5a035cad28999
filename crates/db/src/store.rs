//! PostgreSQL implementations of the `pulse_core` store traits.

use async_trait::async_trait;
use pulse_core::error::CoreError;
use pulse_core::store::{AbnormalSink, ObservationSource};
use pulse_core::types::{AbnormalEvent, Observation};

use crate::repositories::{AbnormalValueRepo, ObservationRepo};
use crate::DbPool;

/// Observation store backed by a table of historical readings.
#[derive(Clone)]
pub struct PgObservationStore {
    pool: DbPool,
    table: String,
}

impl PgObservationStore {
    pub fn new(pool: DbPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ObservationSource for PgObservationStore {
    /// Checks the table exists before scanning it; a missing table or an
    /// unreachable database is a configuration failure.
    async fn scan(&self) -> Result<Vec<Observation>, CoreError> {
        let exists = crate::table_exists(&self.pool, &self.table)
            .await
            .map_err(|e| CoreError::Configuration(format!("observation store unreachable: {e}")))?;
        if !exists {
            return Err(CoreError::Configuration(format!(
                "table {} does not exist",
                self.table
            )));
        }

        let rows = ObservationRepo::scan_all(&self.pool, &self.table)
            .await
            .map_err(|e| CoreError::Configuration(format!("observation scan failed: {e}")))?;

        Ok(rows.into_iter().map(Observation::from).collect())
    }
}

/// Append-only abnormal value store.
#[derive(Clone)]
pub struct PgAbnormalStore {
    pool: DbPool,
    table: String,
}

impl PgAbnormalStore {
    pub fn new(pool: DbPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }
}

#[async_trait]
impl AbnormalSink for PgAbnormalStore {
    async fn record(&self, event: &AbnormalEvent) -> Result<(), CoreError> {
        let id = AbnormalValueRepo::insert(&self.pool, &self.table, event)
            .await
            .map_err(|e| CoreError::Transport(format!("abnormal value insert failed: {e}")))?;

        tracing::debug!(id, subject_id = event.subject_id, "Abnormal value stored");
        Ok(())
    }
}
