//! Attendance Engine HTTP server.
//!
//! Reads configuration from `ATTENDANCE_CONFIG_DIR` (default
//! `./config/default`) and serves the API on the configured bind address.

use std::env;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG_DIR: &str = "./config/default";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    let bind_address = loader.config().server.bind_address.clone();
    info!(
        config_dir = %config_dir,
        organisation = %loader.config().organisation.name,
        rolling_months = loader.rolling_months(),
        "Configuration loaded"
    );

    let state = AppState::new(loader)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Attendance engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
