//! Environment helpers shared by the service configurations.
//!
//! Each binary builds its own config struct once at startup from these
//! helpers and hands it to component constructors. Invalid values surface
//! as [`CoreError::Configuration`] instead of panicking deep inside a
//! component.

use std::str::FromStr;

use crate::error::CoreError;

/// Read `key`, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a required variable.
pub fn env_required(key: &str) -> Result<String, CoreError> {
    std::env::var(key).map_err(|_| CoreError::Configuration(format!("{key} must be set")))
}

/// Read and parse `key`, falling back to `default` when unset.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CoreError::Configuration(format!("{key} is invalid ({raw}): {e}"))),
        Err(_) => Ok(default),
    }
}

/// Store names end up interpolated into SQL, so they must be plain
/// identifiers: ASCII letters, digits and underscores, not starting with a
/// digit, at most 63 bytes (the PostgreSQL limit).
pub fn validate_table_name(name: &str) -> Result<(), CoreError> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    let valid_start = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    if !valid_chars || !valid_start || name.len() > 63 {
        return Err(CoreError::Configuration(format!(
            "invalid table name '{name}'"
        )));
    }
    Ok(())
}
