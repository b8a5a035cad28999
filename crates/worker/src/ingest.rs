//! Line-oriented batch ingestion.
//!
//! Each non-empty input line is one [`ChangeBatch`] in JSON. A line that is
//! not a batch is logged and dropped; the worker keeps reading. Because the
//! source is at-least-once, the same batch may arrive twice and is then
//! classified twice.

use std::future::Future;

use pulse_core::notification::ChangeBatch;
use pulse_events::StreamClassifier;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Running totals across every batch read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub batches: usize,
    pub rejected_lines: usize,
    pub records: usize,
    pub recorded: usize,
    pub failed: usize,
}

/// Read batches from `reader` until end of input or until `shutdown`
/// resolves. A batch already being classified is finished before returning.
pub async fn run<R, F>(reader: R, classifier: &StreamClassifier, shutdown: F) -> IngestSummary
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = reader.lines();
    let mut summary = IngestSummary::default();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::info!("Shutdown requested, no further batches will be read");
                break;
            }
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("End of input");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input, stopping");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let batch = match serde_json::from_str::<ChangeBatch>(&line) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(error = %e, "Input line is not a change batch, dropped");
                summary.rejected_lines += 1;
                continue;
            }
        };

        let report = classifier.on_batch(&batch).await;
        summary.batches += 1;
        summary.records += batch.len();
        summary.recorded += report.recorded();
        summary.failed += report.failed();
    }

    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
