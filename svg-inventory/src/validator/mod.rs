//! Structural validation of SVG documents
//!
//! The inventory pipeline only needs two answers about a document: is it a
//! well-formed SVG document, and how many elements of each tracked shape kind
//! does it contain. [`StructuralValidator`] is that narrow seam, so the parsing
//! engine can be swapped or faked in tests, and a fault inside it surfaces as
//! a [`ValidatorError`] the pipeline can isolate to the one file.
//!
//! # Examples
//!
//! ```rust
//! use svg_inventory::validator::{ShapeKind, StructuralValidator, SvgStructuralValidator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = SvgStructuralValidator::new();
//! let document = br#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/></svg>"#;
//!
//! assert!(validator.validate(document)?);
//! assert_eq!(validator.count(ShapeKind::Rect, document)?, 1);
//! # Ok(())
//! # }
//! ```

mod svg;

pub use svg::{SvgStructuralValidator, SVG_NAMESPACE};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The element categories counted for every inventoried document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// `<rect>`
    Rect,
    /// `<circle>`
    Circle,
    /// `<path>`
    Path,
    /// `<g>`
    Group,
}

impl ShapeKind {
    /// Every shape kind, in the order records report them
    pub const ALL: [Self; 4] = [Self::Rect, Self::Circle, Self::Path, Self::Group];

    /// The SVG element name for this kind
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Path => "path",
            Self::Group => "g",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect => write!(f, "rect"),
            Self::Circle => write!(f, "circle"),
            Self::Path => write!(f, "path"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// Faults raised while validating or counting
///
/// A document that simply is not valid SVG is *not* an error: `validate`
/// answers `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// `count` was asked about a document that does not parse
    #[error("cannot count {kind} elements: {reason}")]
    Unparseable {
        /// Shape kind that was requested
        kind: ShapeKind,
        /// Parser message
        reason: String,
    },

    /// The validation engine failed
    #[error("validator fault: {0}")]
    Fault(String),
}

/// Trait for structural validation engines
///
/// Calls are synchronous and CPU-bound; the inventory pipeline runs them on
/// the blocking thread pool. Callers only invoke [`count`](Self::count) on
/// documents for which [`validate`](Self::validate) returned `Ok(true)`.
#[cfg_attr(test, mockall::automock)]
pub trait StructuralValidator: Send + Sync {
    /// Reports whether the bytes form a well-formed SVG document
    ///
    /// # Errors
    ///
    /// Returns an error only when the engine itself fails; malformed input
    /// yields `Ok(false)`.
    fn validate(&self, document: &[u8]) -> Result<bool, ValidatorError>;

    /// Counts elements of `kind`, nested occurrences included
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or the document cannot be parsed.
    fn count(&self, kind: ShapeKind, document: &[u8]) -> Result<usize, ValidatorError>;

    /// Returns the name of the validator implementation
    fn name(&self) -> &'static str;
}
