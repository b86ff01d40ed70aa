//! Core record model for the markupconv intermediate representation.
//!
//! Every reader produces a [`RecordSet`] and every writer consumes one. The
//! set keeps all records of one image in a single contiguous run, so writers
//! that nest boxes under a parent image element never have to rely on how a
//! reader happened to order its rows.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use log::warn;
use serde::{Deserialize, Serialize};

use super::bbox::BBox;
use super::labels::LabelInventory;

/// One bounding box annotation plus the metadata of the image it sits on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Image identifier without extension or directory prefix.
    pub filename: String,

    /// Width of the image in pixels (`0` when unknown).
    pub width: u32,

    /// Height of the image in pixels (`0` when unknown).
    pub height: u32,

    /// Class name of the object.
    pub label: String,

    /// Bounding box in absolute pixel coordinates.
    pub bbox: BBox,
}

impl Record {
    /// Creates a new record with the given properties.
    pub fn new(
        filename: impl Into<String>,
        width: u32,
        height: u32,
        label: impl Into<String>,
        bbox: BBox,
    ) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
            label: label.into(),
            bbox,
        }
    }

    /// Returns false for the `0x0` "dimensions unknown" sentinel.
    pub fn has_known_dimensions(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

/// An ordered sequence of records, grouped by image.
///
/// Records for the same `filename` always form one contiguous run. Groups
/// appear in the order their filename was first seen, and records keep their
/// relative order inside a group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
    groups: Vec<Range<usize>>,
}

/// All records belonging to one image.
#[derive(Clone, Copy, Debug)]
pub struct ImageGroup<'a> {
    pub filename: &'a str,
    pub width: u32,
    pub height: u32,
    pub records: &'a [Record],
}

impl RecordSet {
    /// Creates an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record set, moving records so that every image is contiguous.
    ///
    /// Grouping is stable: an image's group sits where its filename first
    /// occurs, and boxes within a group keep their input order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut group_index: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<Vec<Record>> = Vec::new();

        for record in records {
            match group_index.get(&record.filename) {
                Some(&idx) => {
                    let first = &buckets[idx][0];
                    if first.width != record.width || first.height != record.height {
                        warn!(
                            "Inconsistent dimensions for '{}': {}x{} vs {}x{}; keeping {}x{} for the image",
                            record.filename,
                            first.width,
                            first.height,
                            record.width,
                            record.height,
                            first.width,
                            first.height
                        );
                    }
                    buckets[idx].push(record);
                }
                None => {
                    group_index.insert(record.filename.clone(), buckets.len());
                    buckets.push(vec![record]);
                }
            }
        }

        let mut flat = Vec::with_capacity(buckets.iter().map(Vec::len).sum());
        let mut groups = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            let start = flat.len();
            flat.extend(bucket);
            groups.push(start..flat.len());
        }

        Self {
            records: flat,
            groups,
        }
    }

    /// Returns all records in group order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the set and returns the records in group order.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Iterates records in group order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records (boxes).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct images.
    pub fn image_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterates one [`ImageGroup`] per distinct filename.
    ///
    /// The group's dimensions are taken from its first record.
    pub fn groups(&self) -> impl Iterator<Item = ImageGroup<'_>> + '_ {
        self.groups.iter().map(move |range| {
            let records = &self.records[range.clone()];
            let first = &records[0];
            ImageGroup {
                filename: &first.filename,
                width: first.width,
                height: first.height,
                records,
            }
        })
    }

    /// Distinct labels in first-occurrence order.
    pub fn labels(&self) -> LabelInventory {
        LabelInventory::from_records(&self.records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Returns true if every filename's records already form one contiguous run.
pub fn is_contiguous(records: &[Record]) -> bool {
    let mut finished: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;

    for record in records {
        let name = record.filename.as_str();
        if current == Some(name) {
            continue;
        }
        if finished.contains(name) {
            return false;
        }
        if let Some(previous) = current {
            finished.insert(previous);
        }
        current = Some(name);
    }

    true
}
