use crate::types::SubjectId;

/// Failure kinds shared by every pulse crate.
///
/// None of these abort a batch or the process: callers handle each one at
/// the smallest scope (one field, one event, one lookup).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A change notification is missing a field or carries an unparseable one.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// The active snapshot holds no range for this subject.
    #[error("{0} not found in ranges")]
    UnknownSubject(SubjectId),

    /// A request parameter was rejected before any lookup happened.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Lookup or store I/O failed, including timeouts.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A backing store is absent or unreachable, or configuration is invalid.
    #[error("Configuration failure: {0}")]
    Configuration(String),
}
