use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::start_server;

/// `RUST_LOG` wins over the configured level
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run() -> Result<()> {
    let config = ConfigService::new().load()?;
    init_tracing(&config.log_level);

    info!(
        host = %config.host,
        port = config.port,
        preview_rows = config.preview_rows,
        max_upload_bytes = config.max_upload_bytes,
        "Starting CSV Data Viewer"
    );

    let server = start_server(&config).map_err(|err| {
        error!(error = %err, host = %config.host, port = config.port, "Failed to bind HTTP server");
        err
    })?;

    server.await?;
    info!("Server stopped");
    Ok(())
}
