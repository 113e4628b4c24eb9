//! Inventory records and the listing payload

use crate::validator::ShapeKind;
use serde::{Deserialize, Serialize};

/// Converts a byte size to whole kilobytes (floor division by 1024)
///
/// # Examples
///
/// ```rust
/// use svg_inventory::inventory::size_in_kb;
///
/// assert_eq!(size_in_kb(1023), 0);
/// assert_eq!(size_in_kb(1024), 1);
/// assert_eq!(size_in_kb(5000), 4);
/// ```
#[must_use]
pub const fn size_in_kb(bytes: u64) -> u64 {
    bytes / 1024
}

/// Per-kind element counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCounts {
    /// Number of `<rect>` elements
    #[serde(rename = "numRects")]
    pub rects: usize,
    /// Number of `<circle>` elements
    #[serde(rename = "numCircs")]
    pub circles: usize,
    /// Number of `<path>` elements
    #[serde(rename = "numPaths")]
    pub paths: usize,
    /// Number of `<g>` elements
    #[serde(rename = "numGroups")]
    pub groups: usize,
}

impl ShapeCounts {
    /// Sets the count for one kind
    pub fn set(&mut self, kind: ShapeKind, count: usize) {
        match kind {
            ShapeKind::Rect => self.rects = count,
            ShapeKind::Circle => self.circles = count,
            ShapeKind::Path => self.paths = count,
            ShapeKind::Group => self.groups = count,
        }
    }
}

/// Aggregated metadata for one validated stored file
///
/// Serializes to the wire shape clients consume:
///
/// ```json
/// {"fileName":"uploads/a.svg","fileSize":0,"numRects":2,"numCircs":1,"numPaths":0,"numGroups":0}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Storage-relative path of the file
    pub file_name: String,
    /// Size in whole kilobytes
    pub file_size: u64,
    /// Shape element counts
    #[serde(flatten)]
    pub shapes: ShapeCounts,
}

/// The inventory listing payload: `{ "info": [InventoryRecord, ...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResponse {
    /// Records in storage enumeration order
    pub info: Vec<InventoryRecord>,
}

impl InventoryResponse {
    /// Assembles the payload from records already in scan order
    #[must_use]
    pub const fn assemble(records: Vec<InventoryRecord>) -> Self {
        Self { info: records }
    }

    /// Number of records in the listing
    #[must_use]
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// Returns true when no file qualified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}
