//! Intermediate Representation (IR) for markupconv.
//!
//! This module defines the canonical, format-agnostic record model and the
//! readers and writers of every supported layout. All conversions pass
//! through a [`RecordSet`], so three readers and three writers cover all
//! nine source/target pairs.
//!
//! # Design Principles
//!
//! 1. **Grouping by construction**: a [`RecordSet`] always keeps the boxes of
//!    one image together, whatever order a reader produced them in.
//!
//! 2. **Permissive values**: boxes with min > max and images with unknown
//!    (`0x0`) dimensions are carried through unchanged.
//!
//! # Example
//!
//! ```
//! use markupconv::ir::{BBox, Record, RecordSet};
//!
//! let records = RecordSet::from_records(vec![
//!     Record::new("img1", 300, 200, "cat", BBox::new(10, 10, 50, 60)),
//!     Record::new("img1", 300, 200, "dog", BBox::new(5, 5, 20, 20)),
//! ]);
//! assert_eq!(records.image_count(), 1);
//! ```

mod bbox;
mod format;
pub mod image_size;
pub mod io_internal;
pub mod io_internal_csv;
pub mod io_voc_xml;
mod labels;
pub mod layout;
mod model;

use std::path::Path;

use crate::error::MarkupError;

// Re-export core types for convenient access
pub use bbox::BBox;
pub use format::Format;
pub use labels::LabelInventory;
pub use model::{is_contiguous, ImageGroup, Record, RecordSet};

/// What a writer put on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Markup files written (per-image files plus dataset-level files).
    pub files_written: usize,
    /// Top-level image groups written.
    pub images_written: usize,
    /// Boxes written.
    pub records_written: usize,
    /// Label inventory persisted by the internal layout.
    pub labels: Option<LabelInventory>,
}

/// Reads a dataset rooted at `path` in the given format.
pub fn read_dataset(path: &Path, format: Format) -> Result<RecordSet, MarkupError> {
    match format {
        Format::Internal => io_internal::read_internal_dir(path),
        Format::InternalCsv => io_internal_csv::read_internal_csv(path),
        Format::PascalVoc => io_voc_xml::read_voc_xml(path),
    }
}

/// Writes `records` as a dataset rooted at `path` in the given format.
pub fn write_dataset(
    path: &Path,
    records: &RecordSet,
    format: Format,
) -> Result<WriteSummary, MarkupError> {
    let mut summary = WriteSummary {
        images_written: records.image_count(),
        records_written: records.len(),
        ..Default::default()
    };

    match format {
        Format::Internal => {
            let labels = io_internal::write_internal_dir(path, records)?;
            summary.files_written = records.image_count() + 1;
            summary.labels = Some(labels);
        }
        Format::InternalCsv => {
            io_internal_csv::write_internal_csv(path, records)?;
            summary.files_written = 1;
        }
        Format::PascalVoc => {
            io_voc_xml::write_voc_xml(path, records)?;
            summary.files_written = 1;
        }
    }

    Ok(summary)
}
