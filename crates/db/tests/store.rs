//! Round trips through the PostgreSQL stores.

use chrono::Utc;
use pulse_core::error::CoreError;
use pulse_core::store::{AbnormalSink, ObservationSource};
use pulse_core::types::{AbnormalEvent, Observation};
use pulse_db::repositories::AbnormalValueRepo;
use pulse_db::{PgAbnormalStore, PgObservationStore};
use sqlx::PgPool;

async fn insert_reading(pool: &PgPool, patient_id: i64, timestamp: i64, value: i32) {
    sqlx::query("INSERT INTO pulse_values (patient_id, timestamp, value) VALUES ($1, $2, $3)")
        .bind(patient_id)
        .bind(timestamp)
        .bind(value)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn scan_returns_every_reading(pool: PgPool) {
    for (ts, value) in [(1, 80), (2, 90), (3, 110), (4, 130)] {
        insert_reading(&pool, 1, ts, value).await;
    }

    let store = PgObservationStore::new(pool, "pulse_values");
    let mut observations = store.scan().await.unwrap();
    observations.sort_by_key(|o| o.timestamp);

    assert_eq!(observations.len(), 4);
    assert_eq!(observations[0], Observation::new(1, 1, 80));
}

#[sqlx::test(migrations = "./migrations")]
async fn scan_of_missing_table_is_configuration_failure(pool: PgPool) {
    let store = PgObservationStore::new(pool, "no_such_table");
    let err = store.scan().await.unwrap_err();

    assert!(matches!(err, CoreError::Configuration(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn redelivered_events_are_stored_twice(pool: PgPool) {
    let store = PgAbnormalStore::new(pool.clone(), "pulse_abnormal_values");
    let event = AbnormalEvent::record(&Observation::new(5, 42, 121), Utc::now());

    store.record(&event).await.unwrap();
    store.record(&event).await.unwrap();

    let rows = AbnormalValueRepo::list_for_patient(&pool, "pulse_abnormal_values", 5, 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);

    let stored: Vec<AbnormalEvent> = rows.into_iter().map(AbnormalEvent::from).collect();
    assert_eq!(stored[0].subject_id, 5);
    assert_eq!(stored[0].timestamp, 42);
    assert_eq!(stored[0].magnitude, 121);
}

#[sqlx::test(migrations = "./migrations")]
async fn health_check_answers_on_live_pool(pool: PgPool) {
    pulse_db::health_check(&pool).await.unwrap();
}
