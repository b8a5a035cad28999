//! Batch classifier for new pulse readings.
//!
//! [`StreamClassifier::on_batch`] folds over the records of a
//! [`ChangeBatch`], producing one [`EventOutcome`] per record. No record can
//! short-circuit the batch: every failure becomes a `Failed` outcome and is
//! logged where it happened. Nothing is retried and nothing is signalled
//! back to the event source, so a transient lookup or store failure loses
//! that reading's classification for good.
//!
//! Records are independent (range lookups are side-effect-free reads), so
//! up to `concurrency` of them are in flight at once. Outcomes are reported
//! in input order; no per-subject ordering is implied.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use pulse_core::error::CoreError;
use pulse_core::notification::{ChangeBatch, ChangeNotification, Operation};
use pulse_core::store::{AbnormalSink, RangeLookup};
use pulse_core::types::{AbnormalEvent, Range, SubjectId};
use serde_json::Value;

/// Default number of records classified concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a record was skipped without classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The notification carried no new value (a deletion or similar).
    NoNewValue,
    /// The operation was not an insert. Never reinterpreted as an update.
    NotInsert(Operation),
}

/// Result of processing one record.
#[derive(Debug)]
pub enum EventOutcome {
    /// The reading lies within its subject's range.
    Normal {
        subject_id: SubjectId,
        magnitude: i32,
        range: Range,
    },
    /// The reading was out of range and has been stored.
    Recorded(AbnormalEvent),
    Ignored(IgnoreReason),
    /// Classification did not complete; no event was stored.
    Failed(CoreError),
}

/// Per-record outcomes of one batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<EventOutcome>,
}

impl BatchReport {
    pub fn normal(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Normal { .. }))
    }

    pub fn recorded(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Recorded(_)))
    }

    pub fn ignored(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Ignored(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Failed(_)))
    }

    /// Events stored during this batch.
    pub fn abnormal_events(&self) -> impl Iterator<Item = &AbnormalEvent> {
        self.outcomes.iter().filter_map(|o| match o {
            EventOutcome::Recorded(event) => Some(event),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&EventOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

// ---------------------------------------------------------------------------
// StreamClassifier
// ---------------------------------------------------------------------------

/// Classifies new readings against their subject's range.
pub struct StreamClassifier {
    lookup: Arc<dyn RangeLookup>,
    sink: Arc<dyn AbnormalSink>,
    concurrency: usize,
}

impl StreamClassifier {
    pub fn new(lookup: Arc<dyn RangeLookup>, sink: Arc<dyn AbnormalSink>) -> Self {
        Self {
            lookup,
            sink,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Bound the number of records in flight. Values below 1 mean 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Process every record of `batch`.
    pub async fn on_batch(&self, batch: &ChangeBatch) -> BatchReport {
        if batch.is_empty() {
            tracing::warn!("No records in the batch");
            return BatchReport::default();
        }

        let outcomes = stream::iter(&batch.records)
            .map(|raw| self.process(raw))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        let report = BatchReport { outcomes };
        tracing::info!(
            records = batch.len(),
            normal = report.normal(),
            recorded = report.recorded(),
            ignored = report.ignored(),
            failed = report.failed(),
            "Batch processed"
        );
        report
    }

    /// Process one raw record. Never fails: errors become
    /// [`EventOutcome::Failed`].
    pub async fn process(&self, raw: &Value) -> EventOutcome {
        match self.classify(raw).await {
            Ok(outcome) => outcome,
            Err(e) => {
                match &e {
                    CoreError::MalformedEvent(_) => {
                        tracing::warn!(error = %e, "Skipping malformed notification");
                    }
                    CoreError::UnknownSubject(subject_id) => {
                        tracing::warn!(
                            subject_id,
                            "No range for subject, skipping classification"
                        );
                    }
                    _ => {
                        tracing::error!(error = %e, "Classification failed, reading skipped");
                    }
                }
                EventOutcome::Failed(e)
            }
        }
    }

    async fn classify(&self, raw: &Value) -> Result<EventOutcome, CoreError> {
        let notification = ChangeNotification::decode(raw)?;

        let Some(reading) = notification.new_value else {
            tracing::warn!(operation = %notification.operation, "No new value found");
            return Ok(EventOutcome::Ignored(IgnoreReason::NoNewValue));
        };

        if notification.operation != Operation::Insert {
            tracing::warn!(
                operation = %notification.operation,
                "Notification is not an INSERT, skipping"
            );
            return Ok(EventOutcome::Ignored(IgnoreReason::NotInsert(
                notification.operation,
            )));
        }

        let observation = reading.to_observation()?;
        tracing::debug!(
            subject_id = observation.subject_id,
            timestamp = observation.timestamp,
            value = observation.magnitude,
            "Pulse value received"
        );

        let range = self.lookup.get_range(observation.subject_id).await?;
        if !range.is_abnormal(observation.magnitude) {
            return Ok(EventOutcome::Normal {
                subject_id: observation.subject_id,
                magnitude: observation.magnitude,
                range,
            });
        }

        tracing::info!(
            subject_id = observation.subject_id,
            value = observation.magnitude,
            min = range.min,
            max = range.max,
            "Abnormal pulse value"
        );

        let event = AbnormalEvent::record(&observation, Utc::now());
        self.sink.record(&event).await?;
        Ok(EventOutcome::Recorded(event))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
