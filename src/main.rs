use anyhow::Result;
use std::sync::Arc;

use workbook_service::{config, create_router, logging, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::from_env()?;

    // Build our application state
    let state = Arc::new(AppState::new(&config));

    let app = create_router(state);

    // Run it
    tracing::info!("listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
