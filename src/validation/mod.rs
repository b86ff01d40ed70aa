//! Conversion settings validation.
//!
//! Every check runs, so a single pass reports all configuration problems:
//! - equal input and output paths
//! - unknown input or output format names
//! - an input path that is not a directory
//! - an output directory that cannot be created
//!
//! The output directory is created here when it does not exist yet.

mod report;

pub use report::{ConfigOption, IssueCode, Severity, ValidationIssue, ValidationReport};

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConvertConfig;
use crate::ir::Format;

/// Settings that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub input_path: PathBuf,
    pub input_format: Format,
    pub output_path: PathBuf,
    pub output_format: Format,
}

/// The outcome of [`validate_config`].
#[derive(Clone, Debug)]
pub struct ConfigValidation {
    pub report: ValidationReport,
    /// Present only when the report has no errors.
    pub resolved: Option<ResolvedConfig>,
}

/// Validates conversion settings and resolves them when they are usable.
pub fn validate_config(config: &ConvertConfig) -> ConfigValidation {
    let mut report = ValidationReport::new();

    if let (Some(input), Some(output)) = (&config.input_path, &config.output_path) {
        if same_path(input, output) {
            report.add(ValidationIssue::error(
                IssueCode::SamePaths,
                format!(
                    "input and output paths must differ (both are {})",
                    input.display()
                ),
                ConfigOption::OutputPath,
            ));
        }
    }

    let input_format = check_format(
        config.input_format.as_deref(),
        ConfigOption::InputFormat,
        &mut report,
    );
    let output_format = check_format(
        config.output_format.as_deref(),
        ConfigOption::OutputFormat,
        &mut report,
    );

    let input_path = config.input_path.as_deref();
    match input_path {
        None => report.add(missing(ConfigOption::InputPath)),
        Some(path) if !path.is_dir() => report.add(ValidationIssue::error(
            IssueCode::InputDirMissing,
            format!("source dataset directory not found: {}", path.display()),
            ConfigOption::InputPath,
        )),
        Some(_) => {}
    }

    let output_path = config.output_path.as_deref();
    match output_path {
        None => report.add(missing(ConfigOption::OutputPath)),
        Some(path) => check_output_dir(path, &mut report),
    }

    let resolved = match (input_path, input_format, output_path, output_format) {
        (Some(input_path), Some(input_format), Some(output_path), Some(output_format))
            if report.is_ok() =>
        {
            Some(ResolvedConfig {
                input_path: input_path.to_path_buf(),
                input_format,
                output_path: output_path.to_path_buf(),
                output_format,
            })
        }
        _ => None,
    };

    ConfigValidation { report, resolved }
}

fn check_format(
    name: Option<&str>,
    option: ConfigOption,
    report: &mut ValidationReport,
) -> Option<Format> {
    let Some(name) = name else {
        report.add(missing(option));
        return None;
    };

    match name.parse::<Format>() {
        Ok(format) => Some(format),
        Err(_) => {
            report.add(ValidationIssue::error(
                IssueCode::UnknownFormat,
                format!(
                    "unknown dataset format '{}', expected one of: {}",
                    name,
                    Format::supported_names()
                ),
                option,
            ));
            None
        }
    }
}

fn check_output_dir(path: &Path, report: &mut ValidationReport) {
    if path.is_dir() {
        let has_content = fs::read_dir(path)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if has_content {
            report.add(ValidationIssue::warning(
                IssueCode::OutputDirNotEmpty,
                format!(
                    "output directory {} is not empty; files with matching names will be overwritten",
                    path.display()
                ),
                ConfigOption::OutputPath,
            ));
        }
        return;
    }

    if let Err(err) = fs::create_dir_all(path) {
        report.add(ValidationIssue::error(
            IssueCode::OutputDirUncreatable,
            format!("cannot create directory {}: {}", path.display(), err),
            ConfigOption::OutputPath,
        ));
    }
}

fn missing(option: ConfigOption) -> ValidationIssue {
    ValidationIssue::error(
        IssueCode::MissingOption,
        format!("option '{}' is not set", option),
        option,
    )
}

fn same_path(left: &Path, right: &Path) -> bool {
    if left == right {
        return true;
    }
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
