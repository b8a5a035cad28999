pub mod health;
pub mod range;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /range?patientId={id}                            subject range lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(range::router())
}
