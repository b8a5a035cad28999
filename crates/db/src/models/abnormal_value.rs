//! Recorded abnormal reading rows.

use pulse_core::types::{AbnormalEvent, SubjectId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the abnormal values table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AbnormalValue {
    pub id: i64,
    pub patient_id: SubjectId,
    pub timestamp: i64,
    pub value: i32,
    pub recorded_at: Timestamp,
}

impl From<AbnormalValue> for AbnormalEvent {
    fn from(row: AbnormalValue) -> Self {
        AbnormalEvent {
            subject_id: row.patient_id,
            timestamp: row.timestamp,
            magnitude: row.value,
            recorded_at: row.recorded_at,
        }
    }
}
