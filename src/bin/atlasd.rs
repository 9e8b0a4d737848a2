//! The `atlasd` server binary: wires the configuration, database pool,
//! gazetteer, and router together and serves until interrupted.

use atlas::prelude::*;
use atlas::server::{router, AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// -----------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    tracing::info!(port = config.port, "starting atlasd v{}", env!("CARGO_PKG_VERSION"));

    let db = AtlasDb::connect(&config.db).await?;

    let atlas = Atlas::new(db, config.remote_client(), config.gazetteer_paths()).await?;

    let state = AppState {
        atlas: Arc::new(atlas),
    }; // struct

    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("atlasd stopped");

    Ok(())
} // fn

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "could not install the shutdown handler");
    } // if
} // fn
