//! End-to-end: the classifier's HTTP range client against the real router
//! served on an ephemeral port.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use pulse_core::error::CoreError;
use pulse_core::store::RangeLookup;
use pulse_events::RangeClient;

/// Serve the test app and return the full range endpoint URL.
async fn serve() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = common::build_test_app(common::test_snapshot());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/v1/range")
}

#[tokio::test]
async fn client_reads_range_from_service() {
    let client = RangeClient::new(&serve().await, Duration::from_secs(5)).unwrap();

    let range = client.get_range(1).await.unwrap();

    assert_eq!(range.subject_id, 1);
    assert_eq!((range.min, range.max), (85, 120));
}

#[tokio::test]
async fn client_maps_404_to_unknown_subject() {
    let client = RangeClient::new(&serve().await, Duration::from_secs(5)).unwrap();

    assert_matches!(client.get_range(77).await, Err(CoreError::UnknownSubject(77)));
}

#[tokio::test]
async fn client_rejects_body_that_is_not_a_range() {
    // The health route answers 200 with a body that has no min/max.
    let endpoint = serve().await.replace("/api/v1/range", "/health");
    let client = RangeClient::new(&endpoint, Duration::from_secs(5)).unwrap();

    assert_matches!(client.get_range(1).await, Err(CoreError::Transport(_)));
}

/// Serve a single `/range` route built from `handler`.
async fn serve_route<H, T>(handler: H) -> String
where
    H: axum::handler::Handler<T, ()>,
    T: 'static,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().route("/range", axum::routing::get(handler));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/range")
}

#[tokio::test]
async fn client_maps_unexpected_status_to_transport_failure() {
    let endpoint =
        serve_route(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "warming up") }).await;
    let client = RangeClient::new(&endpoint, Duration::from_secs(5)).unwrap();

    let err = client.get_range(1).await.unwrap_err();
    assert_matches!(&err, CoreError::Transport(msg) if msg.contains("503"));
}

#[tokio::test]
async fn client_times_out_on_slow_service() {
    let endpoint = serve_route(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "{}"
    })
    .await;
    let client = RangeClient::new(&endpoint, Duration::from_millis(100)).unwrap();

    assert_matches!(client.get_range(1).await, Err(CoreError::Transport(_)));
}
