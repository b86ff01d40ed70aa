//! Format tags used to dispatch readers and writers.

use std::fmt;
use std::str::FromStr;

use crate::error::MarkupError;

/// One of the three supported on-disk markup layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Per-image JSON files under `markup/` plus `meta.json`.
    Internal,
    /// One flat `markup.csv` table.
    InternalCsv,
    /// One `markup.xml` document with an `<annotation>` per image.
    PascalVoc,
}

impl Format {
    /// All formats, in the order they are listed to users.
    pub const ALL: [Format; 3] = [Format::Internal, Format::InternalCsv, Format::PascalVoc];

    /// The name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Internal => "internal",
            Format::InternalCsv => "internalCSV",
            Format::PascalVoc => "pascalVOC",
        }
    }

    /// Names of all formats joined with `|`, for error messages.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(Format::name)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Format::Internal),
            "internalCSV" | "internal-csv" => Ok(Format::InternalCsv),
            "pascalVOC" | "pascal-voc" | "voc" => Ok(Format::PascalVoc),
            other => Err(MarkupError::UnsupportedFormat(format!(
                "'{}' (supported: {})",
                other,
                Format::supported_names()
            ))),
        }
    }
}
