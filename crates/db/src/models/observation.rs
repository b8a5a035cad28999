//! Historical pulse reading rows.

use pulse_core::types::{Observation, SubjectId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the observations table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObservationRow {
    pub patient_id: SubjectId,
    pub timestamp: i64,
    pub value: i32,
}

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Observation::new(row.patient_id, row.timestamp, row.value)
    }
}
