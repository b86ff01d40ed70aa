//! Dataset conversion: validate settings, read, write, copy images.
//!
//! The stages run strictly one after another. Readers and writers only meet
//! through the [`RecordSet`] handed from one stage to the next.

pub mod copy;
pub mod progress;
pub mod report;

pub use copy::{copy_images, CopySummary};
pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
};

use log::{error, info, warn};

use crate::config::ConvertConfig;
use crate::error::MarkupError;
use crate::ir::{read_dataset, write_dataset, Format, RecordSet};
use crate::validation::{validate_config, ResolvedConfig, Severity};

/// Options that affect how a conversion is presented, not what it does.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Draw progress bars on stderr.
    pub show_progress: bool,
}

/// Validates `config` and runs the conversion it describes.
///
/// Every validation issue is logged. If any of them is an error, nothing is
/// read or written and [`MarkupError::InvalidConfig`] is returned.
pub fn convert(
    config: &ConvertConfig,
    opts: &ConvertOptions,
) -> Result<ConversionReport, MarkupError> {
    let validation = validate_config(config);

    for issue in &validation.report.issues {
        match issue.severity {
            Severity::Error => error!("{}", issue),
            Severity::Warning => warn!("{}", issue),
        }
    }

    match validation.resolved {
        Some(resolved) => convert_resolved(&resolved, opts),
        None => Err(MarkupError::InvalidConfig {
            error_count: validation.report.error_count(),
            report: validation.report,
        }),
    }
}

/// Runs a conversion from already validated settings.
pub fn convert_resolved(
    resolved: &ResolvedConfig,
    opts: &ConvertOptions,
) -> Result<ConversionReport, MarkupError> {
    info!(
        "Reading {} dataset from {}",
        resolved.input_format,
        resolved.input_path.display()
    );
    let spinner = progress::create_spinner("Reading source dataset", opts.show_progress);
    let records = read_dataset(&resolved.input_path, resolved.input_format)?;
    spinner.finish_and_clear();

    let mut report =
        build_conversion_report(&records, resolved.input_format, resolved.output_format);

    info!(
        "Writing {} boxes on {} images as {} to {}",
        records.len(),
        records.image_count(),
        resolved.output_format,
        resolved.output_path.display()
    );
    let spinner = progress::create_spinner("Converting", opts.show_progress);
    let summary = write_dataset(&resolved.output_path, &records, resolved.output_format)?;
    spinner.finish_and_clear();
    report.files_written = summary.files_written;

    let bar = progress::create_progress_bar(0, "Copying images", opts.show_progress);
    let copied = copy_images(&resolved.input_path, &resolved.output_path, &bar)?;
    report.images_copied = copied.files;
    if !copied.source_found {
        report.add(ConversionIssue::warning(
            ConversionIssueCode::NoImagesToCopy,
            "source dataset has no images/ directory; no images were copied",
        ));
    }

    Ok(report)
}

/// Builds a report describing `records` and the limits of the target layout.
pub fn build_conversion_report(records: &RecordSet, from: Format, to: Format) -> ConversionReport {
    let mut report = ConversionReport::new(from.name(), to.name());

    let images_without_size = records
        .groups()
        .filter(|group| {
            group
                .records
                .first()
                .is_some_and(|record| !record.has_known_dimensions())
        })
        .count();

    report.input = ConversionCounts {
        images: records.image_count(),
        labels: records.labels().len(),
        records: records.len(),
        images_without_size,
    };

    if records.is_empty() {
        report.add(ConversionIssue::warning(
            ConversionIssueCode::EmptyDataset,
            "source dataset produced no boxes; output will be empty",
        ));
    }

    if images_without_size > 0 {
        report.add(ConversionIssue::warning(
            ConversionIssueCode::UnknownImageDimensions,
            format!(
                "{} image(s) have unknown dimensions and are written as 0x0",
                images_without_size
            ),
        ));
    }

    let inconsistent = records
        .groups()
        .filter(|group| {
            group
                .records
                .iter()
                .any(|r| r.width != group.width || r.height != group.height)
        })
        .count();
    if inconsistent > 0 {
        report.add(ConversionIssue::warning(
            ConversionIssueCode::InconsistentImageDimensions,
            format!(
                "{} image(s) are listed with more than one size; the first one is used",
                inconsistent
            ),
        ));
    }

    let unordered = records.iter().filter(|r| !r.bbox.is_ordered()).count();
    if unordered > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::UnorderedBoxes,
            format!(
                "{} box(es) have min > max and are written unchanged",
                unordered
            ),
        ));
    }

    if from == Format::Internal {
        report.add(ConversionIssue::info(
            ConversionIssueCode::InternalReaderImageSizes,
            "image dimensions were read from image file headers",
        ));
    }

    match to {
        Format::InternalCsv => {
            let with_delimiter = records
                .labels()
                .iter()
                .filter(|label| label.contains(','))
                .count();
            if with_delimiter > 0 {
                report.add(ConversionIssue::warning(
                    ConversionIssueCode::CsvUnquotedDelimiter,
                    format!(
                        "{} label(s) contain ',' and will produce malformed CSV rows",
                        with_delimiter
                    ),
                ));
            }
            add_jpg_note(&mut report);
        }
        Format::PascalVoc => {
            report.add(ConversionIssue::info(
                ConversionIssueCode::VocFixedFields,
                "depth is written as 3; pose, truncated and difficult use fixed values",
            ));
            add_jpg_note(&mut report);
        }
        Format::Internal => {}
    }

    report
}

fn add_jpg_note(report: &mut ConversionReport) {
    report.add(ConversionIssue::info(
        ConversionIssueCode::JpgImagePaths,
        "image references are written as images/<name>.jpg",
    ));
}
