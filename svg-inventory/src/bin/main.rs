//! svg-inventory server
//!
//! Usage: `svg-inventory [config.toml]`
//!
//! Without an argument `./config.toml` is read if present. Any setting can be
//! overridden with `SVG_INVENTORY_<SECTION>__<KEY>` environment variables.

use std::path::PathBuf;
use svg_inventory::{config::AppConfig, observability, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize observability (logging)
    observability::init()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    tracing::info!(
        config_file = ?config_path,
        request_timeout_ms = config.server.request_timeout_ms,
        scan_timeout_ms = config.inventory.scan_timeout_ms,
        "Configuration loaded"
    );

    server::serve(config).await
}
