use pulse_core::config::{env_or, env_parse, env_required, validate_table_name};
use pulse_core::error::CoreError;

/// Server configuration loaded from environment variables.
///
/// Built and validated once in `main` and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string holding the observation history.
    pub database_url: String,
    /// Table scanned once at startup to build ranges (default: `pulse_values`).
    pub observations_table: String,
    /// Apply embedded migrations before loading (default: `true`).
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default        |
    /// |------------------------|----------------|
    /// | `HOST`                 | `0.0.0.0`      |
    /// | `PORT`                 | `3000`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`           |
    /// | `DATABASE_URL`         | required       |
    /// | `OBSERVATIONS_TABLE`   | `pulse_values` |
    /// | `RUN_MIGRATIONS`       | `true`         |
    pub fn from_env() -> Result<Self, CoreError> {
        let observations_table = env_or("OBSERVATIONS_TABLE", "pulse_values");
        validate_table_name(&observations_table)?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000)?,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30)?,
            database_url: env_required("DATABASE_URL")?,
            observations_table,
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
        })
    }
}
