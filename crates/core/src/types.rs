use serde::{Deserialize, Serialize};

/// Subjects are identified by the numeric patient id carried on every reading.
pub type SubjectId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// One pulse reading for a subject.
///
/// `timestamp` is kept exactly as the ingestion source delivered it (epoch
/// milliseconds); it is never reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub subject_id: SubjectId,
    pub timestamp: i64,
    pub magnitude: i32,
}

impl Observation {
    pub fn new(subject_id: SubjectId, timestamp: i64, magnitude: i32) -> Self {
        Self {
            subject_id,
            timestamp,
            magnitude,
        }
    }
}

/// Normal operating bounds for a subject. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub subject_id: SubjectId,
    pub min: i32,
    pub max: i32,
}

impl Range {
    /// A reading is abnormal when it lies strictly outside `[min, max]`.
    pub fn is_abnormal(&self, magnitude: i32) -> bool {
        magnitude > self.max || magnitude < self.min
    }
}

/// A recorded out-of-range observation.
///
/// There is no identity key: redelivery of the same notification produces a
/// second, identical event apart from `recorded_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbnormalEvent {
    pub subject_id: SubjectId,
    pub timestamp: i64,
    pub magnitude: i32,
    pub recorded_at: Timestamp,
}

impl AbnormalEvent {
    /// Copy every field of the observation and stamp it with `recorded_at`.
    pub fn record(observation: &Observation, recorded_at: Timestamp) -> Self {
        Self {
            subject_id: observation.subject_id,
            timestamp: observation.timestamp,
            magnitude: observation.magnitude,
            recorded_at,
        }
    }
}
