pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod humanize;
pub mod models;
pub mod narrative;
pub mod report;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Start the backend: logging, database, reports directory, HTTP server.
/// Blocks until Ctrl-C.
pub fn run() -> Result<(), String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::new());

    // Apply migrations before the first request does.
    core.open_db().map_err(|e| {
        tracing::error!(path = %core.db_path.display(), "Database unavailable: {e}");
        e.to_string()
    })?;
    std::fs::create_dir_all(core.reports_dir()).map_err(|e| {
        tracing::error!(path = %core.reports_dir().display(), "Reports directory unavailable: {e}");
        e.to_string()
    })?;

    tracing::info!(
        facility = %core.facility.display(),
        reports = %core.reports_dir().display(),
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Cannot start async runtime: {e}"))?;

    runtime.block_on(api::serve(config::bind_addr(), core))?;

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
