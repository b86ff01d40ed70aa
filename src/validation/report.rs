//! Validation report types for structured error reporting.

use std::fmt;

/// The result of validating conversion settings.
///
/// Contains all issues found, categorized by severity.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if the report has an issue with the given code.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Configuration is valid");
        }

        writeln!(
            f,
            "Configuration has {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    /// The option the issue is about.
    pub option: ConfigOption,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        option: ConfigOption,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            option,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, option: ConfigOption) -> Self {
        Self::new(Severity::Error, code, message, option)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, option: ConfigOption) -> Self {
        Self::new(Severity::Warning, code, message, option)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.option, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Conversion can proceed.
    Warning,
    /// Conversion must not start.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// A required option was not given.
    MissingOption,
    /// Input and output paths are the same.
    SamePaths,
    /// A format name is not one of the supported names.
    UnknownFormat,
    /// The input path is not a readable directory.
    InputDirMissing,
    /// The output directory does not exist and could not be created.
    OutputDirUncreatable,
    /// The output directory already has content that may be overwritten.
    OutputDirNotEmpty,
}

/// The configuration option an issue refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigOption {
    InputFormat,
    OutputFormat,
    InputPath,
    OutputPath,
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigOption::InputFormat => "input_format",
            ConfigOption::OutputFormat => "output_format",
            ConfigOption::InputPath => "input_path",
            ConfigOption::OutputPath => "output_path",
        };
        f.write_str(name)
    }
}
