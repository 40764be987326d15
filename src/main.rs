//! UniVibe Event Service
//!
//! Main application entry point

use std::time::Duration;

use tracing::info;

use UniVibe::api::{build_router, AppState};
use UniVibe::config::Settings;
use UniVibe::database::{connection, DatabaseService};
use UniVibe::services::ServiceFactory;
use UniVibe::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; keep the guard alive for the process lifetime
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting UniVibe event service...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = connection::PoolConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: Duration::from_secs(30),
        idle_timeout: Some(Duration::from_secs(600)),
        max_lifetime: Some(Duration::from_secs(1800)),
    };
    let pool = connection::create_pool(&pool_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(pool.clone());
    let services = ServiceFactory::new(&database_service, &settings);

    // Start the periodic status sweeper
    info!(
        interval_seconds = settings.sweeper.interval_seconds,
        run_on_startup = settings.sweeper.run_on_startup,
        "Starting status sweeper"
    );
    let sweeper_handle = services.sweeper.clone().spawn();

    // Build and serve the HTTP API
    let state = AppState { services, pool };
    let router = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "UniVibe event service is ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper_handle.abort();
    info!("UniVibe event service has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
    }
    info!("Shutdown signal received");
}
