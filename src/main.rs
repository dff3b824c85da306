use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epc_lookup_api::api;
use epc_lookup_api::config::Config;
use epc_lookup_api::db::Database;
use epc_lookup_api::handlers::AppState;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, opens the certificate database
/// read-only and serves the API until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epc_lookup_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::connect(&config.database_path, config.db_max_connections).await?;
    tracing::info!("Database opened read-only: {}", config.database_path);

    let app_state = Arc::new(AppState::new(db.pool.clone()));
    let app = api::router(app_state, Duration::from_secs(config.request_timeout_secs));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    if config.is_production {
        tracing::info!("Starting in production mode on port {}", config.port);
    } else {
        tracing::info!("Server running on http://localhost:{}", config.port);
        tracing::info!("  GET /api/search?postcode=DN12%202DJ");
        tracing::info!("  GET /api/rating?postcode=DN12%202DJ&address=1,%20Windmill%20Avenue");
        tracing::info!("  GET /api/health");
        tracing::info!("  GET /docs");
    }
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
