//! Application state management
//!
//! Combines configuration, the upload storage backend and the inventory
//! pipeline into one cheaply cloneable value shared by every handler.

use crate::config::AppConfig;
use crate::inventory::InventoryService;
use crate::storage::{FileStorage, LocalFileStorage, StorageResult};
use crate::validator::{StructuralValidator, SvgStructuralValidator};
use std::sync::Arc;

/// Application state for svg-inventory
///
/// # Example
///
/// ```rust,no_run
/// use svg_inventory::{config::AppConfig, state::AppState};
///
/// # fn example() -> anyhow::Result<()> {
/// let state = AppState::from_config(AppConfig::default())?;
///
/// let app: axum::Router = axum::Router::new()
///     .route("/", axum::routing::get(|| async { "Hello!" }))
///     .with_state(state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<AppConfig>,

    /// Where uploads live
    storage: Arc<dyn FileStorage>,

    /// Listing builder over the same storage
    inventory: InventoryService,
}

impl AppState {
    /// Create state from explicit components
    ///
    /// The inventory pipeline reads from the same `storage` uploads are
    /// written to.
    #[must_use]
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn FileStorage>,
        validator: Arc<dyn StructuralValidator>,
    ) -> Self {
        let inventory = InventoryService::new(
            Arc::clone(&storage),
            validator,
            &config.storage.public_prefix,
            &config.inventory,
        );

        Self {
            config: Arc::new(config),
            storage,
            inventory,
        }
    }

    /// Create state backed by the local upload directory and the SVG validator
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` if `storage.upload_dir` exists and
    /// is not a directory.
    pub fn from_config(config: AppConfig) -> StorageResult<Self> {
        let storage = LocalFileStorage::new(config.storage.upload_dir.clone())?;
        Ok(Self::new(
            config,
            Arc::new(storage),
            Arc::new(SvgStructuralValidator::new()),
        ))
    }

    /// Get configuration reference
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the storage backend
    #[must_use]
    pub fn storage(&self) -> &dyn FileStorage {
        self.storage.as_ref()
    }

    /// Get the inventory service
    #[must_use]
    pub const fn inventory(&self) -> &InventoryService {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryFileStorage, UploadedFile};
    use crate::testing::svg_document;

    #[test]
    fn test_from_config_rejects_file_as_upload_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.upload_dir = file.path().to_path_buf();

        assert!(AppState::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_accepts_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.upload_dir = dir.path().join("not-yet-created");

        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.config().storage.public_prefix, "uploads");
    }

    #[tokio::test]
    async fn test_inventory_sees_uploads() {
        let storage = MemoryFileStorage::new();
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(storage.clone()),
            Arc::new(SvgStructuralValidator::new()),
        );

        state
            .storage()
            .store(UploadedFile::new("a.svg", "image/svg+xml", svg_document(1, 0, 0, 0)))
            .await
            .unwrap();

        let response = state.inventory().build().await.unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clone_state() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(MemoryFileStorage::new()),
            Arc::new(SvgStructuralValidator::new()),
        );
        let cloned = state.clone();

        // Both should reference the same Arc
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.storage, &cloned.storage));
    }
}
