use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use coffee_service::store::{IdGenerator, UuidIdGenerator, build_store};
use coffee_service::{AppState, CoffeeService, Config, build_router, metrics, seed, utils};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Coffee Service v{}", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Run the application, returning an exit code on error.
async fn run() -> Result<(), exitcode::ExitCode> {
    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {e}");
        exitcode::CONFIG
    })?;
    info!(
        host = %config.host,
        port = %config.port,
        backend = %config.store_backend,
        seed = config.seed_data,
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_addr()
        && let Err(e) = metrics::init_metrics(addr)
    {
        // Metrics are optional; keep serving without them
        warn!("{e}");
    }

    // Open the store and load seed data before accepting requests
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    let store = build_store(&config, Arc::clone(&ids)).await.map_err(|e| {
        error!("Failed to open coffee store: {e}");
        exitcode::UNAVAILABLE
    })?;

    if config.seed_data {
        seed::load_seed_data(store.as_ref()).await.map_err(|e| {
            error!("Failed to load seed data: {e}");
            exitcode::UNAVAILABLE
        })?;
    } else {
        info!("Seed data disabled (SEED_DATA=false)");
    }
    if let Ok(count) = store.count().await {
        metrics::set_record_count(count);
    }

    // Build application state and router
    let state = AppState::new(CoffeeService::new(store, ids), config.clone());
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET    /coffees          - List coffees");
    info!("  GET    /coffees/{{id}}     - Get a coffee");
    info!("  POST   /coffees          - Create a coffee");
    info!("  PUT    /coffees/{{id}}     - Create or replace a coffee");
    info!("  DELETE /coffees/{{id}}     - Delete a coffee");
    info!("  GET    /greeting         - Greeting name");
    info!("  GET    /greeting/coffee  - Greeting coffee");
    info!("  GET    /droid            - Configured droid");
    info!("  GET    /health           - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!("Server shutdown complete");
    Ok(())
}
