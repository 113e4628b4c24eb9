//! Test helpers shared across unit tests
//!
//! - SVG document builders with known shape counts
//! - [`AppState`] constructors over in-memory storage
//! - Validators that fault, panic or stall on demand

use crate::config::AppConfig;
use crate::state::AppState;
use crate::storage::{FileStorage, MemoryFileStorage};
use crate::validator::{ShapeKind, StructuralValidator, SvgStructuralValidator, ValidatorError};
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

// Re-export mockall for test usage
pub use mockall;

/// Well-formed SVG with exactly the given number of each shape
pub fn svg_document(rects: usize, circles: usize, paths: usize, groups: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..rects {
        write!(body, r#"<rect x="{i}" y="0" width="10" height="5"/>"#).unwrap();
    }
    for i in 0..circles {
        write!(body, r#"<circle cx="{i}" cy="0" r="4"/>"#).unwrap();
    }
    for i in 0..paths {
        write!(body, r#"<path d="M{i} 0 L10 10 Z"/>"#).unwrap();
    }
    for i in 0..groups {
        write!(body, r#"<g id="g{i}"/>"#).unwrap();
    }
    wrap(&body)
}

/// Valid SVG with one rect whose `<desc>` carries `tag`
///
/// Used to single out a document for [`FaultyValidator`].
pub fn tagged_svg_document(tag: &str) -> Vec<u8> {
    wrap(&format!(
        r#"<desc>{tag}</desc><rect width="1" height="1"/>"#
    ))
}

fn wrap(body: &str) -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">{body}</svg>"#
    )
    .into_bytes()
}

/// State over fresh in-memory storage with default configuration
pub fn memory_state() -> (AppState, MemoryFileStorage) {
    memory_state_with_config(AppConfig::default())
}

/// State over fresh in-memory storage; the returned handle shares its files
pub fn memory_state_with_config(config: AppConfig) -> (AppState, MemoryFileStorage) {
    let storage = MemoryFileStorage::new();
    let state = state_with_storage(config, Arc::new(storage.clone()));
    (state, storage)
}

/// State over an arbitrary backend (e.g. a `MockFileStorage`)
pub fn state_with_storage(config: AppConfig, storage: Arc<dyn FileStorage>) -> AppState {
    AppState::new(config, storage, Arc::new(SvgStructuralValidator::new()))
}

#[derive(Debug, Clone, Copy)]
enum FaultMode {
    Error,
    Panic,
}

/// Delegates to [`SvgStructuralValidator`] except on documents containing a marker
#[derive(Debug, Clone)]
pub struct FaultyValidator {
    marker: Vec<u8>,
    mode: FaultMode,
    inner: SvgStructuralValidator,
}

impl FaultyValidator {
    /// Returns `ValidatorError::Fault` for marked documents
    pub fn failing_on(marker: &[u8]) -> Self {
        Self {
            marker: marker.to_vec(),
            mode: FaultMode::Error,
            inner: SvgStructuralValidator::new(),
        }
    }

    /// Panics on marked documents
    pub fn panicking_on(marker: &[u8]) -> Self {
        Self {
            marker: marker.to_vec(),
            mode: FaultMode::Panic,
            inner: SvgStructuralValidator::new(),
        }
    }

    fn trip(&self, document: &[u8]) -> Result<(), ValidatorError> {
        if !document
            .windows(self.marker.len())
            .any(|window| window == self.marker.as_slice())
        {
            return Ok(());
        }
        match self.mode {
            FaultMode::Error => Err(ValidatorError::Fault("injected fault".to_string())),
            FaultMode::Panic => panic!("injected validator panic"),
        }
    }
}

impl StructuralValidator for FaultyValidator {
    fn validate(&self, document: &[u8]) -> Result<bool, ValidatorError> {
        self.trip(document)?;
        self.inner.validate(document)
    }

    fn count(&self, kind: ShapeKind, document: &[u8]) -> Result<usize, ValidatorError> {
        self.trip(document)?;
        self.inner.count(kind, document)
    }

    fn name(&self) -> &'static str {
        "faulty"
    }
}

/// Sleeps before every call, then delegates to [`SvgStructuralValidator`]
#[derive(Debug, Clone)]
pub struct SlowValidator {
    delay: Duration,
    inner: SvgStructuralValidator,
}

impl SlowValidator {
    /// Waits `delay` on the calling thread before each call
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: SvgStructuralValidator::new(),
        }
    }
}

impl StructuralValidator for SlowValidator {
    fn validate(&self, document: &[u8]) -> Result<bool, ValidatorError> {
        std::thread::sleep(self.delay);
        self.inner.validate(document)
    }

    fn count(&self, kind: ShapeKind, document: &[u8]) -> Result<usize, ValidatorError> {
        std::thread::sleep(self.delay);
        self.inner.count(kind, document)
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_document_counts() {
        let validator = SvgStructuralValidator::new();
        let document = svg_document(3, 2, 1, 4);

        assert!(validator.validate(&document).unwrap());
        assert_eq!(validator.count(ShapeKind::Rect, &document).unwrap(), 3);
        assert_eq!(validator.count(ShapeKind::Circle, &document).unwrap(), 2);
        assert_eq!(validator.count(ShapeKind::Path, &document).unwrap(), 1);
        assert_eq!(validator.count(ShapeKind::Group, &document).unwrap(), 4);
    }

    #[test]
    fn test_faulty_validator_only_trips_on_marker() {
        let validator = FaultyValidator::failing_on(b"poison");

        assert!(validator.validate(&svg_document(1, 0, 0, 0)).unwrap());
        assert!(matches!(
            validator.validate(&tagged_svg_document("poison")),
            Err(ValidatorError::Fault(_))
        ));
    }
}
