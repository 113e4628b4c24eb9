//! Observability (structured logging)
//!
//! Log levels come from `RUST_LOG` when set. Otherwise debug builds log
//! `debug` (and `trace` for this crate) with pretty output, release builds
//! log `info` as JSON lines.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives for debug builds
pub const DEV_FILTER: &str = "debug,svg_inventory=trace";

/// Default directives for release builds
pub const RELEASE_FILTER: &str = "info";

/// Initialize the global tracing subscriber
///
/// # Example
///
/// ```rust,no_run
/// use svg_inventory::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    }

    Ok(())
}

fn default_filter() -> EnvFilter {
    if cfg!(debug_assertions) {
        EnvFilter::new(DEV_FILTER)
    } else {
        EnvFilter::new(RELEASE_FILTER)
    }
}
