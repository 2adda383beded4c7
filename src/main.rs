use anyhow::{Context, Result};

use drawing_intel_backend::{app, config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings)?;

    tracing::info!(
        env = ?settings.env,
        log_format = ?settings.log_format,
        server_addr = %settings.server_addr,
        storage_dir = %settings.storage_dir.display(),
        "Starting drawing intelligence backend"
    );

    // Open record store (absent when DATABASE_URL is unset)
    let store = db::open_store(&settings).await?;

    // Create application state and the upload directory
    let state = app::AppState::new(store, settings.clone());
    state
        .files
        .ensure_dir()
        .await
        .context("Failed to create upload directory")?;

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server_addr))?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
