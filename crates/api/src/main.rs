use std::net::SocketAddr;
use std::sync::Arc;

use pulse_core::{RangeCache, RangeSnapshot};
use pulse_db::{DbPool, PgObservationStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_api::config::ServerConfig;
use pulse_api::router::build_app_router;
use pulse_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_api=debug,pulse_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        table = %config.observations_table,
        "Loaded server configuration"
    );

    // --- Database ---
    // Lazy pool: only a malformed URL fails here.
    let pool = pulse_db::create_pool(&config.database_url).expect("Invalid DATABASE_URL");

    // --- Range snapshot ---
    // Built exactly once. A missing or unreachable store yields an empty
    // snapshot, never a failed startup.
    let ranges = load_ranges(pool.clone(), &config).await;

    // --- App state ---
    let state = AppState {
        ranges,
        pool,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Migrate and scan the observation store into the snapshot served for the
/// lifetime of the process.
async fn load_ranges(pool: DbPool, config: &ServerConfig) -> Arc<RangeSnapshot> {
    if config.run_migrations {
        match pulse_db::run_migrations(&pool).await {
            Ok(()) => tracing::info!("Database migrations applied"),
            Err(e) => tracing::warn!(error = %e, "Database migrations not applied"),
        }
    }

    let store = PgObservationStore::new(pool, config.observations_table.clone());
    RangeCache::load(&store).await.snapshot().await
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
