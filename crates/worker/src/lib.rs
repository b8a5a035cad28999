//! Pulse classifier worker.
//!
//! Reads change-notification batches (one JSON batch per line) and feeds
//! them to the [`StreamClassifier`](pulse_events::StreamClassifier).

pub mod config;
pub mod ingest;
