//! Route definitions for the range lookup protocol.

use axum::routing::get;
use axum::Router;

use crate::handlers::range;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// GET /range?patientId={id}           -> get_range
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/range", get(range::get_range))
}
