//! Integration tests for the range lookup protocol.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_snapshot};
use pulse_core::types::Observation;
use pulse_core::RangeSnapshot;

// ---------------------------------------------------------------------------
// Test: known subject returns its bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn known_subject_returns_min_and_max() {
    let app = build_test_app(test_snapshot());
    let response = get(app, "/api/v1/range?patientId=1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"min": 85, "max": 120}));
}

// ---------------------------------------------------------------------------
// Test: ranges computed from observations are served
// ---------------------------------------------------------------------------

#[tokio::test]
async fn serves_ranges_computed_from_history() {
    let history = [
        Observation::new(7, 1, 80),
        Observation::new(7, 2, 90),
        Observation::new(7, 3, 110),
        Observation::new(7, 4, 130),
    ];
    let app = build_test_app(RangeSnapshot::from_observations(&history));
    let json = body_json(get(app, "/api/v1/range?patientId=7").await).await;

    assert_eq!(json["min"], 85);
    assert_eq!(json["max"], 120);
}

// ---------------------------------------------------------------------------
// Test: unknown subject returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_subject_returns_404() {
    let app = build_test_app(test_snapshot());
    let response = get(app, "/api/v1/range?patientId=42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "42 not found in ranges");
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: missing parameter returns 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_patient_id_returns_400() {
    let app = build_test_app(test_snapshot());
    let response = get(app, "/api/v1/range").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "no patientId parameter");
}

// ---------------------------------------------------------------------------
// Test: non-numeric parameter returns 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_numeric_patient_id_returns_400() {
    let app = build_test_app(test_snapshot());
    let response = get(app, "/api/v1/range?patientId=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: empty snapshot knows no subject
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_snapshot_returns_404_for_everyone() {
    let app = build_test_app(RangeSnapshot::empty());
    let response = get(app, "/api/v1/range?patientId=1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: undeserializable query string still answers with a JSON error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeated_patient_id_returns_json_400() {
    let app = build_test_app(test_snapshot());
    let response = get(app, "/api/v1/range?patientId=1&patientId=2").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("patientId"));
}
