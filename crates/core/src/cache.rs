//! The active range snapshot and how it is loaded.
//!
//! [`RangeCache`] holds an `Arc<RangeSnapshot>` behind a `RwLock`. Readers
//! take the lock only long enough to clone the `Arc`, then read the snapshot
//! lock-free. A reload builds a complete new snapshot first and swaps the
//! reference afterwards, so a reader never sees a partially built one.
//!
//! Ranges are stale by design: observations stored after [`RangeCache::load`]
//! are not served until someone calls [`RangeCache::reload`], and nothing in
//! the system does so automatically.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::snapshot::RangeSnapshot;
use crate::store::{ObservationSource, RangeLookup};
use crate::types::{Range, SubjectId};

/// Shared holder of the active [`RangeSnapshot`].
///
/// Designed to be wrapped in `Arc` and shared across handlers.
pub struct RangeCache {
    active: RwLock<Arc<RangeSnapshot>>,
}

impl RangeCache {
    /// Wrap an already built snapshot.
    pub fn new(snapshot: RangeSnapshot) -> Self {
        Self {
            active: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Scan `source` once and build the initial snapshot.
    ///
    /// Never fails: if the source is absent or unreachable the cache starts
    /// with an empty snapshot and the failure is logged.
    pub async fn load(source: &dyn ObservationSource) -> Self {
        tracing::info!("Loading subject ranges from observation store");

        let snapshot = match build_snapshot(source).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Observation store unavailable, serving an empty range snapshot"
                );
                RangeSnapshot::empty()
            }
        };

        tracing::info!(subjects = snapshot.len(), "Finished loading subject ranges");
        Self::new(snapshot)
    }

    /// Rebuild from `source` and swap the active snapshot.
    ///
    /// On failure the current snapshot stays active and the error is
    /// returned. Returns the number of subjects in the new snapshot.
    pub async fn reload(&self, source: &dyn ObservationSource) -> Result<usize, CoreError> {
        let snapshot = build_snapshot(source).await?;
        let subjects = snapshot.len();

        *self.active.write().await = Arc::new(snapshot);
        tracing::info!(subjects, "Range snapshot reloaded");

        Ok(subjects)
    }

    /// The active snapshot. Holders keep it alive across reloads.
    pub async fn snapshot(&self) -> Arc<RangeSnapshot> {
        Arc::clone(&*self.active.read().await)
    }

    pub async fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError> {
        self.snapshot().await.get_range(subject_id)
    }
}

#[async_trait]
impl RangeLookup for RangeCache {
    async fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError> {
        RangeCache::get_range(self, subject_id).await
    }
}

async fn build_snapshot(source: &dyn ObservationSource) -> Result<RangeSnapshot, CoreError> {
    let observations = source.scan().await?;
    tracing::debug!(observations = observations.len(), "Scanned observation store");
    Ok(RangeSnapshot::from_observations(&observations))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
