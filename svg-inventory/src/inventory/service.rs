//! Request-scoped inventory pipeline

use super::aggregator::InventoryAggregator;
use super::record::{InventoryRecord, InventoryResponse};
use super::scanner::{self, DirectoryScanner};
use super::{InventoryError, InventoryResult};
use crate::config::InventorySettings;
use crate::storage::{FileStorage, StorageError, StoredFile};
use crate::validator::{StructuralValidator, ValidatorError};
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Scans storage and assembles the inventory listing
///
/// Every call re-reads and re-validates the whole storage; nothing is cached
/// between requests. The work is bounded three ways:
/// - at most `max_concurrent_scans` listings are built at once, later callers wait
/// - per listing, at most `scan_workers` files are validated concurrently on the
///   blocking pool
/// - the whole listing must finish within `scan_timeout`
///
/// Dropping the returned future abandons the scan.
#[derive(Clone)]
pub struct InventoryService {
    scanner: DirectoryScanner,
    validator: Arc<dyn StructuralValidator>,
    aggregator: Arc<InventoryAggregator>,
    permits: Arc<Semaphore>,
    scan_workers: usize,
    scan_timeout: Duration,
}

impl InventoryService {
    /// Creates a service over a storage backend and a validator
    #[must_use]
    pub fn new(
        storage: Arc<dyn FileStorage>,
        validator: Arc<dyn StructuralValidator>,
        public_prefix: &str,
        settings: &InventorySettings,
    ) -> Self {
        Self {
            scanner: DirectoryScanner::new(storage),
            validator,
            aggregator: Arc::new(InventoryAggregator::new(public_prefix)),
            permits: Arc::new(Semaphore::new(settings.max_concurrent_scans.max(1))),
            scan_workers: settings.scan_workers.max(1),
            scan_timeout: Duration::from_millis(settings.scan_timeout_ms),
        }
    }

    /// Builds the listing for the current storage contents
    ///
    /// # Errors
    ///
    /// - `InventoryError::Storage` if storage cannot be enumerated
    /// - `InventoryError::Timeout` if the scan exceeds the configured limit
    ///
    /// Faults on individual files never fail the listing; those files are
    /// left out and logged.
    pub async fn build(&self) -> InventoryResult<InventoryResponse> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| InventoryError::Unavailable)?;

        let records = tokio::time::timeout(self.scan_timeout, self.collect())
            .await
            .map_err(|_| {
                tracing::warn!(timeout = ?self.scan_timeout, "inventory scan timed out");
                InventoryError::Timeout(self.scan_timeout)
            })??;

        tracing::debug!(records = records.len(), "inventory assembled");
        Ok(InventoryResponse::assemble(records))
    }

    async fn collect(&self) -> InventoryResult<Vec<InventoryRecord>> {
        let candidates = self.scanner.candidates().await?;

        // `buffered` keeps storage order while running up to N files at once
        let records: Vec<Option<InventoryRecord>> = stream::iter(candidates)
            .map(|file| self.inspect(file))
            .buffered(self.scan_workers)
            .collect()
            .await;

        Ok(records.into_iter().flatten().collect())
    }

    /// Validates and aggregates one candidate; `None` excludes it
    async fn inspect(&self, file: StoredFile) -> Option<InventoryRecord> {
        let document = match self.scanner.load(&file).await {
            Ok(document) => document,
            Err(StorageError::NotFound(_)) => {
                tracing::debug!(file = %file.filename, "file vanished before it could be read");
                return None;
            }
            Err(e) => {
                tracing::warn!(file = %file.filename, error = %e, "failed to read candidate, excluded");
                return None;
            }
        };

        let filename = file.filename.clone();
        let validator = Arc::clone(&self.validator);
        let aggregator = Arc::clone(&self.aggregator);

        let outcome = tokio::task::spawn_blocking(move || -> Result<Option<InventoryRecord>, ValidatorError> {
            if !scanner::screen(validator.as_ref(), &file, &document)? {
                return Ok(None);
            }
            aggregator
                .record(validator.as_ref(), &file, &document)
                .map(Some)
        })
        .await;

        match outcome {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                tracing::warn!(file = %filename, error = %e, "validator fault, excluded from inventory");
                None
            }
            Err(e) => {
                tracing::warn!(file = %filename, error = %e, "validator task aborted, excluded from inventory");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileStorage;
    use crate::testing::{svg_document, tagged_svg_document, FaultyValidator, SlowValidator};
    use crate::validator::{ShapeKind, SvgStructuralValidator};

    fn settings() -> InventorySettings {
        InventorySettings::default()
    }

    fn service_over(
        storage: &MemoryFileStorage,
        validator: Arc<dyn StructuralValidator>,
    ) -> InventoryService {
        InventoryService::new(Arc::new(storage.clone()), validator, "uploads", &settings())
    }

    #[tokio::test]
    async fn test_scenario_listing() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", svg_document(2, 1, 0, 0));
        storage.insert("b.txt", &b"plain text"[..]);
        storage.insert("c.svg", &b"<svg xmlns=\"http://www.w3.org/2000/svg\"><rect>"[..]);

        let service = service_over(&storage, Arc::new(SvgStructuralValidator::new()));
        let response = service.build().await.unwrap();

        assert_eq!(response.len(), 1);
        let record = &response.info[0];
        assert_eq!(record.file_name, "uploads/a.svg");
        assert_eq!(record.shapes.rects, 2);
        assert_eq!(record.shapes.circles, 1);
        assert_eq!(record.shapes.paths, 0);
        assert_eq!(record.shapes.groups, 0);
    }

    #[tokio::test]
    async fn test_listing_preserves_storage_order() {
        let storage = MemoryFileStorage::new();
        for name in ["d.svg", "a.svg", "c.svg", "b.svg"] {
            storage.insert(name, svg_document(1, 0, 0, 0));
        }

        let service = service_over(&storage, Arc::new(SvgStructuralValidator::new()));
        let names: Vec<String> = service
            .build()
            .await
            .unwrap()
            .info
            .into_iter()
            .map(|r| r.file_name)
            .collect();

        assert_eq!(
            names,
            vec!["uploads/a.svg", "uploads/b.svg", "uploads/c.svg", "uploads/d.svg"]
        );
    }

    #[tokio::test]
    async fn test_size_is_floored_to_kilobytes() {
        let storage = MemoryFileStorage::new();
        let mut document = svg_document(0, 0, 1, 0);
        document.resize(3000, b' ');
        storage.insert("padded.svg", document);

        let service = service_over(&storage, Arc::new(SvgStructuralValidator::new()));
        let response = service.build().await.unwrap();

        assert_eq!(response.info[0].file_size, 2);
    }

    #[tokio::test]
    async fn test_repeated_builds_are_identical() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", svg_document(3, 2, 1, 1));
        storage.insert("b.svg", svg_document(0, 0, 0, 5));

        let service = service_over(&storage, Arc::new(SvgStructuralValidator::new()));
        let first = service.build().await.unwrap();
        let second = service.build().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fault_on_one_file_is_isolated() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", svg_document(1, 0, 0, 0));
        storage.insert("poison.svg", tagged_svg_document("poison"));
        storage.insert("z.svg", svg_document(0, 1, 0, 0));

        let validator = FaultyValidator::failing_on(b"poison");
        let service = service_over(&storage, Arc::new(validator));
        let names: Vec<String> = service
            .build()
            .await
            .unwrap()
            .info
            .into_iter()
            .map(|r| r.file_name)
            .collect();

        assert_eq!(names, vec!["uploads/a.svg", "uploads/z.svg"]);
    }

    #[tokio::test]
    async fn test_panicking_validator_is_isolated() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", svg_document(1, 0, 0, 0));
        storage.insert("panic.svg", tagged_svg_document("panic"));

        let validator = FaultyValidator::panicking_on(b"panic");
        let service = service_over(&storage, Arc::new(validator));
        let response = service.build().await.unwrap();

        assert_eq!(response.len(), 1);
        assert_eq!(response.info[0].file_name, "uploads/a.svg");
    }

    #[tokio::test]
    async fn test_scan_timeout() {
        let storage = MemoryFileStorage::new();
        storage.insert("slow.svg", svg_document(1, 0, 0, 0));

        let settings = InventorySettings {
            scan_timeout_ms: 20,
            ..InventorySettings::default()
        };
        let service = InventoryService::new(
            Arc::new(storage),
            Arc::new(SlowValidator::new(Duration::from_millis(500))),
            "uploads",
            &settings,
        );

        let result = service.build().await;
        assert!(matches!(result, Err(InventoryError::Timeout(_))));
    }

    /// Sleeps on `validate` for documents containing `marker`
    struct DelayOnMarker {
        marker: &'static [u8],
        delay: Duration,
        inner: SvgStructuralValidator,
    }

    impl StructuralValidator for DelayOnMarker {
        fn validate(&self, document: &[u8]) -> Result<bool, ValidatorError> {
            if document
                .windows(self.marker.len())
                .any(|window| window == self.marker)
            {
                std::thread::sleep(self.delay);
            }
            self.inner.validate(document)
        }

        fn count(&self, kind: ShapeKind, document: &[u8]) -> Result<usize, ValidatorError> {
            self.inner.count(kind, document)
        }

        fn name(&self) -> &'static str {
            "delay-on-marker"
        }
    }

    #[tokio::test]
    async fn test_order_kept_when_later_files_finish_first() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", tagged_svg_document("slowest"));
        storage.insert("b.svg", tagged_svg_document("slower"));
        storage.insert("c.svg", svg_document(0, 1, 0, 0));
        storage.insert("d.svg", svg_document(0, 0, 1, 0));

        let validator = DelayOnMarker {
            marker: b"slow",
            delay: Duration::from_millis(150),
            inner: SvgStructuralValidator::new(),
        };
        let settings = InventorySettings {
            scan_workers: 4,
            ..InventorySettings::default()
        };
        let service = InventoryService::new(Arc::new(storage), Arc::new(validator), "uploads", &settings);

        let names: Vec<String> = service
            .build()
            .await
            .unwrap()
            .info
            .into_iter()
            .map(|r| r.file_name)
            .collect();

        assert_eq!(
            names,
            vec!["uploads/a.svg", "uploads/b.svg", "uploads/c.svg", "uploads/d.svg"]
        );
    }

    #[tokio::test]
    async fn test_second_listing_waits_for_permit() {
        let storage = MemoryFileStorage::new();
        storage.insert("a.svg", svg_document(1, 0, 0, 0));

        let settings = InventorySettings {
            max_concurrent_scans: 1,
            ..InventorySettings::default()
        };
        // validate + four counts, 100ms each
        let service = InventoryService::new(
            Arc::new(storage),
            Arc::new(SlowValidator::new(Duration::from_millis(100))),
            "uploads",
            &settings,
        );

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.build().await }
        });
        // Let the first listing take the only permit
        tokio::time::sleep(Duration::from_millis(50)).await;

        let waiting = tokio::time::timeout(Duration::from_millis(150), service.build()).await;
        assert!(waiting.is_err(), "second listing ran without a permit");

        assert_eq!(first.await.unwrap().unwrap().len(), 1);
        assert_eq!(service.build().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_storage() {
        let storage = MemoryFileStorage::new();
        let service = service_over(&storage, Arc::new(SvgStructuralValidator::new()));

        assert!(service.build().await.unwrap().is_empty());
    }
}
