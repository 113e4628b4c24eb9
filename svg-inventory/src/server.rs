//! Router assembly and server startup
//!
//! | Method | Path              | Handler                                      |
//! |--------|-------------------|----------------------------------------------|
//! | POST   | `/upload`         | [`upload_file`](crate::handlers::upload_file)       |
//! | GET    | `/inventory`      | [`list_inventory`](crate::handlers::list_inventory) |
//! | GET    | `/fileInfo`       | [`list_inventory`](crate::handlers::list_inventory) |
//! | GET    | `/uploads/{name}` | [`serve_upload`](crate::handlers::serve_upload)     |
//! | GET    | `/health`         | [`health_check`](crate::handlers::health_check)     |

use crate::config::AppConfig;
use crate::handlers::{health_check, list_inventory, serve_upload, upload_file};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Room for multipart boundaries and part headers on top of the file itself
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application router
///
/// # Example
///
/// ```rust,no_run
/// use svg_inventory::{config::AppConfig, server, state::AppState};
///
/// # fn example() -> anyhow::Result<()> {
/// let state = AppState::from_config(AppConfig::default())?;
/// let app = server::router(state);
/// # Ok(())
/// # }
/// ```
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let body_limit = config
        .upload
        .max_file_size
        .saturating_add(MULTIPART_OVERHEAD);
    let request_timeout = config.server.request_timeout();

    Router::new()
        .route("/upload", post(upload_file))
        .route("/inventory", get(list_inventory))
        .route("/fileInfo", get(list_inventory))
        .route("/uploads/{name}", get(serve_upload))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the upload directory is unusable, the address does
/// not parse or cannot be bound, or the server fails while running.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.bind_addr()?;
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let config = state.config();
    tracing::info!(
        addr = %addr,
        upload_dir = %config.storage.upload_dir.display(),
        max_file_size = config.upload.max_file_size,
        scan_workers = config.inventory.scan_workers,
        max_concurrent_scans = config.inventory.max_concurrent_scans,
        "svg-inventory listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C (SIGINT) or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received terminate signal"),
    }

    tracing::info!("shutting down gracefully");
}
