//! Immutable point-in-time materialization of all computed ranges.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::CoreError;
use crate::ranges::compute_ranges;
use crate::store::RangeLookup;
use crate::types::{Observation, Range, SubjectId, Timestamp};

/// Ranges for every subject observed before the snapshot was taken.
///
/// Never mutated after construction. A refresh builds a new snapshot.
#[derive(Debug, Clone)]
pub struct RangeSnapshot {
    ranges: HashMap<SubjectId, Range>,
    loaded_at: Timestamp,
}

impl RangeSnapshot {
    /// A snapshot with no ranges; every lookup is `UnknownSubject`.
    pub fn empty() -> Self {
        Self::from_ranges(HashMap::new())
    }

    /// Run range derivation over `observations` and freeze the result.
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self::from_ranges(compute_ranges(observations))
    }

    pub fn from_ranges(ranges: HashMap<SubjectId, Range>) -> Self {
        Self {
            ranges,
            loaded_at: Utc::now(),
        }
    }

    /// Look up a subject's range.
    pub fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError> {
        self.ranges
            .get(&subject_id)
            .copied()
            .ok_or(CoreError::UnknownSubject(subject_id))
    }

    /// Number of subjects with a range.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// When this snapshot was built.
    pub fn loaded_at(&self) -> Timestamp {
        self.loaded_at
    }
}

#[async_trait]
impl RangeLookup for RangeSnapshot {
    async fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError> {
        RangeSnapshot::get_range(self, subject_id)
    }
}
