//! Handler for the range lookup protocol.
//!
//! `GET /range?patientId=<id>` answers from the snapshot built at startup;
//! it never touches the observation store.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use pulse_core::error::CoreError;
use pulse_core::types::SubjectId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the range endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub patient_id: Option<String>,
}

/// Success body: the subject's inclusive bounds.
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub min: i32,
    pub max: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /range
///
/// 400 without `patientId`, with a non-numeric one, or with a query string
/// that does not deserialize (a repeated `patientId`, for one). 404 when the
/// subject is not in the snapshot.
pub async fn get_range(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> AppResult<Json<RangeResponse>> {
    let Query(params) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let raw = params
        .patient_id
        .ok_or_else(|| AppError::BadRequest("no patientId parameter".into()))?;

    let subject_id: SubjectId = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!("patientId must be an integer, got '{raw}'"))
    })?;

    let range = state.ranges.get_range(subject_id)?;
    tracing::debug!(subject_id, min = range.min, max = range.max, "Range served");

    Ok(Json(RangeResponse {
        min: range.min,
        max: range.max,
    }))
}
