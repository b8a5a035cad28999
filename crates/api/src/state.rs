use std::sync::Arc;

use pulse_core::RangeSnapshot;
use pulse_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Ranges built once at startup. Immutable, so handlers read it without
    /// taking any lock.
    pub ranges: Arc<RangeSnapshot>,
    /// Pool for the observation database, used by the health check.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
