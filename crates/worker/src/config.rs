use std::time::Duration;

use pulse_core::config::{env_or, env_parse, env_required, validate_table_name};
use pulse_core::error::CoreError;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Full URL of the range endpoint, e.g. `http://localhost:3000/api/v1/range`.
    pub range_service_url: String,
    /// Upper bound on one range lookup (default: `2000` ms).
    pub lookup_timeout: Duration,
    /// PostgreSQL connection string for the abnormal values store.
    pub database_url: String,
    /// Append-only table for abnormal values (default: `pulse_abnormal_values`).
    pub abnormal_table: String,
    /// Records classified concurrently within a batch (default: `8`).
    pub batch_concurrency: usize,
    /// Apply embedded migrations at startup (default: `true`).
    pub run_migrations: bool,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `RANGE_SERVICE_URL`       | required                |
    /// | `RANGE_LOOKUP_TIMEOUT_MS` | `2000`                  |
    /// | `DATABASE_URL`            | required                |
    /// | `ABNORMAL_VALUES_TABLE`   | `pulse_abnormal_values` |
    /// | `BATCH_CONCURRENCY`       | `8`                     |
    /// | `RUN_MIGRATIONS`          | `true`                  |
    pub fn from_env() -> Result<Self, CoreError> {
        let abnormal_table = env_or("ABNORMAL_VALUES_TABLE", "pulse_abnormal_values");
        validate_table_name(&abnormal_table)?;

        let lookup_timeout_ms: u64 = env_parse("RANGE_LOOKUP_TIMEOUT_MS", 2000)?;
        if lookup_timeout_ms == 0 {
            return Err(CoreError::Configuration(
                "RANGE_LOOKUP_TIMEOUT_MS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            range_service_url: env_required("RANGE_SERVICE_URL")?,
            lookup_timeout: Duration::from_millis(lookup_timeout_ms),
            database_url: env_required("DATABASE_URL")?,
            abnormal_table,
            batch_concurrency: env_parse("BATCH_CONCURRENCY", 8)?,
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
        })
    }
}
