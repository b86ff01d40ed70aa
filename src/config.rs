//! Conversion settings loaded from a JSON file and command-line overrides.
//!
//! ```json
//! {
//!   "input_format": "internal",
//!   "output_format": "pascalVOC",
//!   "input_path": "datasets/source",
//!   "output_path": "datasets/voc"
//! }
//! ```
//!
//! Every field is optional at this stage; missing or unknown values are
//! reported by [`crate::validation::validate_config`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MarkupError;

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Raw, unvalidated conversion settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl ConvertConfig {
    /// Loads settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, MarkupError> {
        let raw = fs::read_to_string(path).map_err(|source| MarkupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw).map_err(|source| MarkupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads `path` if given, else `config.json` from the working directory
    /// when present, else empty settings.
    pub fn discover(path: Option<&Path>) -> Result<Self, MarkupError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_json_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Returns `self` with every field that is set in `overrides` replaced.
    pub fn merge(self, overrides: ConvertConfig) -> Self {
        Self {
            input_format: overrides.input_format.or(self.input_format),
            output_format: overrides.output_format.or(self.output_format),
            input_path: overrides.input_path.or(self.input_path),
            output_path: overrides.output_path.or(self.output_path),
        }
    }
}
