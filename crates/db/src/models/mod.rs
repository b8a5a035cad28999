//! Row models.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row and the conversion into the `pulse_core` domain type.

pub mod abnormal_value;
pub mod observation;
