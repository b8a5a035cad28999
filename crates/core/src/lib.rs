//! Pulse monitoring domain.
//!
//! Pure building blocks shared by the range service and the classifier:
//!
//! - [`ranges`]: derivation of per-subject normal ranges.
//! - [`snapshot`] / [`cache`]: the immutable range snapshot and its holder.
//! - [`notification`]: the change-notification wire model.
//! - [`store`]: traits for the observation store, abnormal sink and range lookup.

pub mod cache;
pub mod config;
pub mod error;
pub mod notification;
pub mod ranges;
pub mod snapshot;
pub mod store;
pub mod types;

pub use cache::RangeCache;
pub use error::CoreError;
pub use snapshot::RangeSnapshot;
