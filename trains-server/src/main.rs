use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trains_server::config::ServerConfig;
use trains_server::navitia::NavitiaClient;
use trains_server::stops::{self, StopDirectory};
use trains_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Create Navitia client
    let navitia = Arc::new(NavitiaClient::new(config.navitia.clone())?);

    // Seed the stop directory; the server starts even if this fails
    let directory = StopDirectory::new();
    stops::seed_if_empty(&navitia, &directory).await;

    // Spawn background task to refresh the stop directory
    let refresh_client = navitia.clone();
    let refresh_directory = directory.clone();
    let refresh_period = config.stops_refresh;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_period);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match stops::refresh(&refresh_client, &refresh_directory).await {
                Ok(count) => info!(count, "refreshed stop directory"),
                Err(e) => warn!(error = %e.chain(), "failed to refresh stop directory"),
            }
        }
    });

    let app = create_router(AppState::new(navitia, directory));

    let addr = config.socket_addr().await?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("departure monitor listening on http://{addr}");
    info!("  GET /health          - health check");
    info!("  GET /api/stops       - stop directory");
    info!("  GET /api/stops/{{id}}  - departures for one stop");

    axum::serve(listener, app).await?;
    Ok(())
}
