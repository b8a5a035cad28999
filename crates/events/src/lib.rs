//! Change-notification processing for pulse monitoring.
//!
//! - [`StreamClassifier`]: consumes notification batches, looks up each
//!   subject's range and records out-of-range readings.
//! - [`RangeClient`]: HTTP implementation of the range lookup with a bounded
//!   request timeout.

pub mod classifier;
pub mod client;

pub use classifier::{BatchReport, EventOutcome, IgnoreReason, StreamClassifier};
pub use client::{LookupError, RangeClient};
