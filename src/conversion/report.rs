//! Conversion report types.
//!
//! A report records what a conversion read, what it wrote, and which
//! limitations of the target layout applied to this particular dataset.

use serde::Serialize;
use std::fmt;

/// A report generated during format conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Source format name.
    pub from: String,
    /// Target format name.
    pub to: String,
    /// Counts from the source dataset.
    pub input: ConversionCounts,
    /// Markup files written to the output dataset.
    pub files_written: usize,
    /// Image files copied to the output dataset.
    pub images_copied: usize,
    /// Issues discovered during conversion analysis.
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    /// Create a new empty report for a conversion between formats.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    /// Count of info-level issues (fixed values, layout notes).
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Returns true if the report has an issue with the given code.
    pub fn has(&self, code: ConversionIssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Converted {} -> {}", self.from, self.to)?;
        writeln!(
            f,
            "  {} images, {} labels, {} boxes",
            self.input.images, self.input.labels, self.input.records
        )?;
        writeln!(
            f,
            "  {} markup file(s) written, {} image file(s) copied",
            self.files_written, self.images_copied
        )?;

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of dataset elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    pub images: usize,
    pub labels: usize,
    pub records: usize,
    /// Images whose dimensions are the `0x0` sentinel.
    pub images_without_size: usize,
}

/// A single issue discovered during conversion analysis.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// Create a warning-level issue.
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue.
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    Warning,
    Info,
}

/// Stable issue codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// The source dataset produced no boxes.
    EmptyDataset,
    /// Some images have unknown (`0x0`) dimensions.
    UnknownImageDimensions,
    /// Some labels contain a comma and will break their CSV rows.
    CsvUnquotedDelimiter,
    /// Some images are listed with more than one size.
    InconsistentImageDimensions,
    /// Some boxes have min > max; they are carried through unchanged.
    UnorderedBoxes,
    /// VOC writer emits constant depth, pose, truncated and difficult values.
    VocFixedFields,
    /// internalCSV and pascalVOC writers assume `.jpg` image files.
    JpgImagePaths,
    /// internal reader takes dimensions from image headers.
    InternalReaderImageSizes,
    /// The input dataset has no `images/` directory to copy.
    NoImagesToCopy,
}
