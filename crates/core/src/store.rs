//! Seams between the pulse pipeline and its collaborators.
//!
//! The database crate implements the two store traits over PostgreSQL; the
//! events crate implements [`RangeLookup`] over HTTP. In-process snapshots
//! implement [`RangeLookup`] directly.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{AbnormalEvent, Observation, Range, SubjectId};

/// Durable record of historical readings, scanned once at startup.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Return every stored observation.
    ///
    /// A missing or unreachable store is a [`CoreError::Configuration`].
    async fn scan(&self) -> Result<Vec<Observation>, CoreError>;
}

/// Append-only sink for detected anomalies.
#[async_trait]
pub trait AbnormalSink: Send + Sync {
    /// Insert one event. No deduplication, no cross-event atomicity.
    async fn record(&self, event: &AbnormalEvent) -> Result<(), CoreError>;
}

/// Synchronous request/response range lookup.
#[async_trait]
pub trait RangeLookup: Send + Sync {
    /// Returns [`CoreError::UnknownSubject`] when no range exists and
    /// [`CoreError::Transport`] when the lookup itself failed.
    async fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError>;
}
