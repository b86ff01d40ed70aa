//! internalCSV reader and writer.
//!
//! A dataset in this layout is a single `markup.csv`:
//!
//! ```text
//! filename,width,height,class,xmin,ymin,xmax,ymax
//! images/img1.jpg,300,200,cat,10,10,50,60
//! ```
//!
//! # Column binding
//!
//! The header line is skipped without being inspected. Columns are bound by
//! position: 0 image path, 1 width, 2 height, 3 label, 4..=7 the box. A row
//! with any other number of fields fails the whole read.
//!
//! # Format limitations
//!
//! Fields are never quoted on either side, so `"` is ordinary label text. A
//! label containing a comma produces a row with too many fields, which the
//! reader then rejects.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::warn;

use super::layout::{image_id, relative_image_path, CSV_FILE};
use super::model::{is_contiguous, Record, RecordSet};
use super::BBox;
use crate::error::MarkupError;

/// Header written as the first line of every `markup.csv`.
pub const CSV_HEADER: [&str; 8] = [
    "filename", "width", "height", "class", "xmin", "ymin", "xmax", "ymax",
];

const FIELD_COUNT: usize = CSV_HEADER.len();

/// Reads `markup.csv` from the dataset rooted at `path`.
///
/// # Errors
/// Returns an error if the file cannot be opened, or if any row has the wrong
/// number of fields or a non-numeric size or coordinate.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use markupconv::ir::io_internal_csv::read_internal_csv;
///
/// let records = read_internal_csv(Path::new("dataset"))?;
/// # Ok::<(), markupconv::MarkupError>(())
/// ```
pub fn read_internal_csv(path: &Path) -> Result<RecordSet, MarkupError> {
    let csv_path = path.join(CSV_FILE);
    let file = File::open(&csv_path).map_err(MarkupError::Io)?;
    read_rows(BufReader::new(file), &csv_path)
}

/// Writes `records` as `markup.csv` under `path`.
pub fn write_internal_csv(path: &Path, records: &RecordSet) -> Result<(), MarkupError> {
    let csv_path = path.join(CSV_FILE);
    let file = File::create(&csv_path).map_err(MarkupError::Io)?;

    let writer = write_rows(BufWriter::new(file), records, &csv_path)?;
    writer
        .into_inner()
        .map_err(|e| MarkupError::Io(e.into_error()))?
        .flush()
        .map_err(MarkupError::Io)
}

/// Reads records from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_internal_csv_str(csv_str: &str) -> Result<RecordSet, MarkupError> {
    from_internal_csv_slice(csv_str.as_bytes())
}

/// Reads records from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_internal_csv_slice(bytes: &[u8]) -> Result<RecordSet, MarkupError> {
    read_rows(bytes, Path::new("<bytes>"))
}

/// Writes records to a CSV string.
pub fn to_internal_csv_string(records: &RecordSet) -> Result<String, MarkupError> {
    let dummy_path = Path::new("<string>");
    let writer = write_rows(Vec::new(), records, dummy_path)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| MarkupError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| MarkupError::CsvInvalid {
        path: dummy_path.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}

fn read_rows<R: Read>(reader: R, path: &Path) -> Result<RecordSet, MarkupError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|source| MarkupError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(row_to_record(&row, path)?);
    }

    if !is_contiguous(&records) {
        warn!(
            "{}: rows for the same image are not adjacent; regrouping by image",
            path.display()
        );
    }

    Ok(RecordSet::from_records(records))
}

fn row_to_record(row: &csv::StringRecord, path: &Path) -> Result<Record, MarkupError> {
    let line = row.position().map(|pos| pos.line()).unwrap_or(0);

    if row.len() != FIELD_COUNT {
        return Err(MarkupError::CsvInvalid {
            path: path.to_path_buf(),
            message: format!(
                "line {}: expected {} fields, found {}",
                line,
                FIELD_COUNT,
                row.len()
            ),
        });
    }

    let field = |idx: usize| row.get(idx).unwrap_or_default();

    Ok(Record::new(
        image_id(field(0)),
        parse_field::<u32>(field(1), CSV_HEADER[1], line, path)?,
        parse_field::<u32>(field(2), CSV_HEADER[2], line, path)?,
        field(3),
        BBox::new(
            parse_field::<i64>(field(4), CSV_HEADER[4], line, path)?,
            parse_field::<i64>(field(5), CSV_HEADER[5], line, path)?,
            parse_field::<i64>(field(6), CSV_HEADER[6], line, path)?,
            parse_field::<i64>(field(7), CSV_HEADER[7], line, path)?,
        ),
    ))
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    column: &str,
    line: u64,
    path: &Path,
) -> Result<T, MarkupError> {
    raw.trim().parse::<T>().map_err(|_| MarkupError::CsvInvalid {
        path: path.to_path_buf(),
        message: format!("line {line}: invalid {column} value '{raw}'; expected an integer"),
    })
}

fn write_rows<W: Write>(
    writer: W,
    records: &RecordSet,
    path: &Path,
) -> Result<csv::Writer<W>, MarkupError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let to_write_error = |source| MarkupError::CsvWrite {
        path: PathBuf::from(path),
        source,
    };

    csv_writer.write_record(CSV_HEADER).map_err(to_write_error)?;

    for record in records {
        csv_writer
            .write_record([
                relative_image_path(&record.filename),
                record.width.to_string(),
                record.height.to_string(),
                record.label.clone(),
                record.bbox.x_min.to_string(),
                record.bbox.y_min.to_string(),
                record.bbox.x_max.to_string(),
                record.bbox.y_max.to_string(),
            ])
            .map_err(to_write_error)?;
    }

    Ok(csv_writer)
}
