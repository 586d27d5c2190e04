use std::process::ExitCode;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use bus_server::catalog::{CatalogFile, RouteCatalog};
use bus_server::config::ServerConfig;
use bus_server::matcher::StopMatcher;
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load the route catalog (fail fast if unavailable)
    info!(path = %config.catalog_path.display(), "Loading route catalog");
    let catalog = match RouteCatalog::load(CatalogFile::new(&config.catalog_path)).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load route catalog: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded {} routes", catalog.len().await);

    if let Some(period) = config.reload_interval {
        spawn_reload(catalog.clone(), period);
    }

    let matcher = StopMatcher::new(config.matcher.clone());
    info!(policy = ?matcher.config().policy, "Stop matcher ready");

    let app = create_router(AppState::new(catalog, matcher));

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!("Bus route directory listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/buses          - List routes");
    info!("  GET  /api/buses/filter   - Filter routes by text");
    info!("  GET  /api/buses/:id      - Fetch one route");
    info!("  GET  /api/search         - Search by destination");
    info!("  GET  /api/stops/recommend - Type-ahead stop names");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    info!("Server shutdown complete");
    ExitCode::SUCCESS
}

/// Reload the catalog from disk every `period`, keeping the old routes on failure.
fn spawn_reload(catalog: RouteCatalog, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog.reload().await {
                Ok(count) => info!("Reloaded route catalog: {count} routes"),
                Err(e) => error!("Failed to reload route catalog: {e}"),
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
