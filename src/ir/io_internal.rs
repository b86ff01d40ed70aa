//! Internal markup reader and writer.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   markup/<id>.json   [{"x":10,"y":10,"x1":50,"y1":60,"label":"cat"}, ...]
//!   images/<id>.jpg
//!   meta.json          {"labels":["cat","dog"]}
//! ```
//!
//! Entry fields are renamed from the IR: `x_min -> x`, `y_min -> y`,
//! `x_max -> x1`, `y_max -> y1`. Image dimensions are not stored in the
//! markup; the reader takes them from the image header.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::image_size::dimensions_or_unknown;
use super::labels::LabelInventory;
use super::layout::{image_id, image_path, MARKUP_DIR, META_FILE};
use super::model::{Record, RecordSet};
use super::BBox;
use crate::error::MarkupError;

/// One box entry of a per-image JSON file.
#[derive(Debug, Serialize, Deserialize)]
struct InternalEntry {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    label: String,
}

/// Dataset-level `meta.json`.
#[derive(Debug, Serialize, Deserialize)]
struct MetaFile {
    labels: Vec<String>,
}

impl InternalEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            x: record.bbox.x_min,
            y: record.bbox.y_min,
            x1: record.bbox.x_max,
            y1: record.bbox.y_max,
            label: record.label.clone(),
        }
    }

    fn into_record(self, filename: &str, width: u32, height: u32) -> Record {
        Record::new(
            filename,
            width,
            height,
            self.label,
            BBox::new(self.x, self.y, self.x1, self.y1),
        )
    }
}

/// Reads an internal dataset rooted at `path`.
///
/// Every regular file in `markup/` is one image. Files that cannot be read
/// or parsed are logged and skipped. Images that cannot be sized produce
/// records with `0x0` dimensions.
///
/// # Errors
/// Returns an error if `markup/` is missing or cannot be listed.
pub fn read_internal_dir(path: &Path) -> Result<RecordSet, MarkupError> {
    let markup_dir = path.join(MARKUP_DIR);
    if !markup_dir.is_dir() {
        return Err(MarkupError::InternalLayoutInvalid {
            path: path.to_path_buf(),
            message: format!("expected a {MARKUP_DIR}/ directory"),
        });
    }

    let files = collect_markup_files(&markup_dir)?;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for file_path in files {
        let entries = match parse_markup_file(&file_path) {
            Ok(entries) => entries,
            Err(err) => {
                error!("{err}; skipping file");
                skipped += 1;
                continue;
            }
        };

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filename = image_id(&file_name);
        let (width, height) = dimensions_or_unknown(&image_path(path, filename));

        records.extend(
            entries
                .into_iter()
                .map(|entry| entry.into_record(filename, width, height)),
        );
    }

    if skipped > 0 {
        debug!("skipped {skipped} unreadable markup file(s) in {}", markup_dir.display());
    }

    Ok(RecordSet::from_records(records))
}

/// Writes `records` as an internal dataset rooted at `path`.
///
/// Creates `markup/` if needed and writes one JSON file per image, then
/// `meta.json` with the labels in first-seen order. Files left over from a
/// previous run under other names are not removed.
///
/// Returns the label inventory that was written to `meta.json`.
pub fn write_internal_dir(path: &Path, records: &RecordSet) -> Result<LabelInventory, MarkupError> {
    let markup_dir = path.join(MARKUP_DIR);
    fs::create_dir_all(&markup_dir).map_err(MarkupError::Io)?;

    let mut labels = LabelInventory::new();

    for group in records.groups() {
        let entries: Vec<InternalEntry> = group
            .records
            .iter()
            .map(|record| {
                labels.insert(&record.label);
                InternalEntry::from_record(record)
            })
            .collect();

        let file_path = markup_dir.join(format!("{}.json", group.filename));
        write_json(&file_path, &entries)?;
    }

    let meta = MetaFile {
        labels: labels.as_slice().to_vec(),
    };
    write_json(&path.join(META_FILE), &meta)?;

    Ok(labels)
}

/// Parses one per-image JSON document from a string.
///
/// `filename` is the image the document belongs to. Image dimensions are
/// not part of the document, so every record is `0x0`.
///
/// Useful for testing and fuzzing without file I/O.
pub fn from_internal_json_str(json: &str, filename: &str) -> Result<Vec<Record>, MarkupError> {
    from_internal_json_slice(json.as_bytes(), filename)
}

/// Parses one per-image JSON document from bytes.
pub fn from_internal_json_slice(bytes: &[u8], filename: &str) -> Result<Vec<Record>, MarkupError> {
    let entries = parse_entries(bytes, Path::new("<memory>"))?;
    Ok(entries
        .into_iter()
        .map(|entry| entry.into_record(filename, 0, 0))
        .collect())
}

/// Serializes the records of one image as a per-image JSON document.
///
/// All records are written regardless of their filename.
pub fn to_internal_json_string(records: &[Record]) -> Result<String, MarkupError> {
    let entries: Vec<InternalEntry> = records.iter().map(InternalEntry::from_record).collect();
    serde_json::to_string(&entries).map_err(|source| MarkupError::InternalJsonWrite {
        path: PathBuf::from("<string>"),
        source,
    })
}

/// Reads the label list from an internal dataset's `meta.json`.
pub fn read_meta_labels(path: &Path) -> Result<Vec<String>, MarkupError> {
    let meta_path = path.join(META_FILE);
    let bytes = fs::read(&meta_path).map_err(MarkupError::Io)?;
    let meta: MetaFile =
        serde_json::from_slice(&bytes).map_err(|source| MarkupError::InternalJsonParse {
            path: meta_path,
            source,
        })?;
    Ok(meta.labels)
}

fn collect_markup_files(dir: &Path) -> Result<Vec<PathBuf>, MarkupError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(MarkupError::Io)? {
        let entry = entry.map_err(MarkupError::Io)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    Ok(files)
}

fn parse_markup_file(path: &Path) -> Result<Vec<InternalEntry>, MarkupError> {
    let bytes = fs::read(path).map_err(|source| MarkupError::InternalLayoutInvalid {
        path: path.to_path_buf(),
        message: format!("failed to read markup file: {source}"),
    })?;
    parse_entries(&bytes, path)
}

fn parse_entries(bytes: &[u8], path: &Path) -> Result<Vec<InternalEntry>, MarkupError> {
    serde_json::from_slice(bytes).map_err(|source| MarkupError::InternalJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), MarkupError> {
    let file = File::create(path).map_err(MarkupError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, value).map_err(|source| MarkupError::InternalJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(MarkupError::Io)
}
