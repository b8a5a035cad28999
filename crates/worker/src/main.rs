use std::sync::Arc;

use pulse_db::PgAbnormalStore;
use pulse_events::{RangeClient, StreamClassifier};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_worker::config::WorkerConfig;
use pulse_worker::ingest;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_worker=debug,pulse_events=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env().expect("Invalid worker configuration");
    tracing::info!(
        range_service = %config.range_service_url,
        timeout_ms = config.lookup_timeout.as_millis() as u64,
        table = %config.abnormal_table,
        "Loaded worker configuration"
    );

    // --- Abnormal value store ---
    let pool = pulse_db::create_pool(&config.database_url).expect("Invalid DATABASE_URL");
    if config.run_migrations {
        match pulse_db::run_migrations(&pool).await {
            Ok(()) => tracing::info!("Database migrations applied"),
            Err(e) => tracing::warn!(error = %e, "Database migrations not applied"),
        }
    }
    let sink = Arc::new(PgAbnormalStore::new(pool, config.abnormal_table.clone()));

    // --- Range lookup ---
    let lookup = Arc::new(
        RangeClient::new(&config.range_service_url, config.lookup_timeout)
            .expect("Invalid range service configuration"),
    );

    let classifier =
        StreamClassifier::new(lookup, sink).with_concurrency(config.batch_concurrency);

    tracing::info!("Worker started, reading change batches from stdin");
    let summary = ingest::run(
        BufReader::new(tokio::io::stdin()),
        &classifier,
        shutdown_signal(),
    )
    .await;

    tracing::info!(
        batches = summary.batches,
        records = summary.records,
        recorded = summary.recorded,
        failed = summary.failed,
        rejected_lines = summary.rejected_lines,
        "Worker stopped"
    );
}

/// Resolve on SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C)"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
