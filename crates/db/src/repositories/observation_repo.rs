//! Repository for the observations table.

use sqlx::PgPool;

use crate::models::observation::ObservationRow;

/// Column list for observation queries.
const COLUMNS: &str = "patient_id, timestamp, value";

/// Read access to historical readings.
pub struct ObservationRepo;

impl ObservationRepo {
    /// Full scan of every stored reading.
    pub async fn scan_all(pool: &PgPool, table: &str) -> Result<Vec<ObservationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {table}");
        sqlx::query_as::<_, ObservationRow>(&query)
            .fetch_all(pool)
            .await
    }
}
