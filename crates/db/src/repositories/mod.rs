//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Table names come from validated
//! configuration and are interpolated into the query text.

pub mod abnormal_value_repo;
pub mod observation_repo;

pub use abnormal_value_repo::AbnormalValueRepo;
pub use observation_repo::ObservationRepo;
