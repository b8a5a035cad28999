//! Range derivation from historical observations.
//!
//! Pure logic, no I/O. Each subject's readings are split into a low bucket
//! (below [`SPLIT_THRESHOLD`]) and a high bucket (at or above it). The
//! truncated average of the low bucket becomes the range minimum and the
//! truncated average of the high bucket becomes the maximum. This is a
//! bucket-average heuristic, not a statistical range.

use std::collections::HashMap;

use crate::types::{Observation, Range, SubjectId};

/// Readings below this value land in the low bucket.
pub const SPLIT_THRESHOLD: i32 = 100;

/// Range minimum used when a subject has no low-bucket readings.
pub const FLOOR_DEFAULT: i32 = 0;

/// Range maximum used when a subject has no high-bucket readings.
pub const CEILING_DEFAULT: i32 = 100;

/// Running sums for one subject. Sums are `i64` so long histories of `i32`
/// readings cannot overflow.
#[derive(Debug, Default)]
struct Buckets {
    low_sum: i64,
    low_count: i64,
    high_sum: i64,
    high_count: i64,
}

impl Buckets {
    fn add(&mut self, magnitude: i32) {
        if magnitude < SPLIT_THRESHOLD {
            self.low_sum += i64::from(magnitude);
            self.low_count += 1;
        } else {
            self.high_sum += i64::from(magnitude);
            self.high_count += 1;
        }
    }

    fn into_range(self, subject_id: SubjectId) -> Range {
        Range {
            subject_id,
            min: truncated_average(self.low_sum, self.low_count).unwrap_or(FLOOR_DEFAULT),
            max: truncated_average(self.high_sum, self.high_count).unwrap_or(CEILING_DEFAULT),
        }
    }
}

/// Integer average truncated toward zero, or `None` for an empty bucket.
///
/// The mean of `i32` values always fits in an `i32`.
fn truncated_average(sum: i64, count: i64) -> Option<i32> {
    if count == 0 {
        return None;
    }
    Some((sum / count) as i32)
}

/// Compute a [`Range`] for every subject present in `observations`.
///
/// Deterministic and O(n): the same observations always yield the same map,
/// regardless of input order.
pub fn compute_ranges<'a, I>(observations: I) -> HashMap<SubjectId, Range>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut buckets: HashMap<SubjectId, Buckets> = HashMap::new();
    for obs in observations {
        buckets.entry(obs.subject_id).or_default().add(obs.magnitude);
    }

    buckets
        .into_iter()
        .map(|(subject_id, b)| (subject_id, b.into_range(subject_id)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
