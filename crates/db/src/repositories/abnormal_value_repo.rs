//! Repository for the abnormal values table.

use pulse_core::types::{AbnormalEvent, SubjectId};
use sqlx::PgPool;

use crate::models::abnormal_value::AbnormalValue;

/// Column list for abnormal value queries.
const COLUMNS: &str = "id, patient_id, timestamp, value, recorded_at";

/// Append-only access to recorded anomalies.
pub struct AbnormalValueRepo;

impl AbnormalValueRepo {
    /// Insert one event, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        table: &str,
        event: &AbnormalEvent,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (patient_id, timestamp, value, recorded_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id"
        );
        sqlx::query_scalar(&query)
            .bind(event.subject_id)
            .bind(event.timestamp)
            .bind(event.magnitude)
            .bind(event.recorded_at)
            .fetch_one(pool)
            .await
    }

    /// List a subject's recorded events, newest reading first.
    pub async fn list_for_patient(
        pool: &PgPool,
        table: &str,
        patient_id: SubjectId,
        limit: i64,
    ) -> Result<Vec<AbnormalValue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} \
             WHERE patient_id = $1 \
             ORDER BY timestamp DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, AbnormalValue>(&query)
            .bind(patient_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
