//! Conversion settings, loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [columns]
//! id = "Forslagsnummer"
//!
//! [classifier]
//! alternative_marker = "F"
//!
//! [[classifier.rules]]
//! status = "O"
//! markers = [["Oversendt"]]
//!
//! [document]
//! title = "Innstilling"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alternative::DEFAULT_MARKER;
use crate::status::StatusCode;

pub const DEFAULT_TITLE: &str = "Redaksjonskomitéens innstilling til Politisk Måldokument";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnMap,
    pub classifier: ClassifierConfig,
    pub document: DocumentConfig,
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.id.trim().is_empty() || self.columns.decision.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "columns.id and columns.decision must be non-empty".into(),
            ));
        }
        if let Some(rules) = &self.classifier.rules {
            for (i, rule) in rules.iter().enumerate() {
                rule.check(i)?;
            }
        }
        Ok(())
    }
}

/// Header names of the raw export's columns.
///
/// Defaults match the proposal form export. Matching trims surrounding
/// whitespace on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub id: String,
    pub name: String,
    pub school: String,
    pub change_type: String,
    pub location: String,
    pub change_text: String,
    pub decision: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: "Auto Merge Field".into(),
            name: "Navn".into(),
            school: "Skole".into(),
            change_type: "Type endring".into(),
            location: "Punkt".into(),
            change_text: "Endring".into(),
            decision: "Innstilling".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Character that starts the label of a winning alternative.
    pub alternative_marker: char,
    /// Ordered rule table; `None` uses the built-in table.
    pub rules: Option<Vec<RuleConfig>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alternative_marker: DEFAULT_MARKER,
            rules: None,
        }
    }
}

/// One classifier rule: every group must contain at least one marker found
/// in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub status: StatusCode,
    pub markers: Vec<Vec<String>>,
}

impl RuleConfig {
    /// Reject rules that could never match or would match everything.
    /// `index` is the rule's position in `classifier.rules`.
    pub fn check(&self, index: usize) -> Result<(), ConfigError> {
        let problem = if self.markers.is_empty() || self.markers.iter().any(|g| g.is_empty()) {
            "an empty marker group"
        } else if self.markers.iter().flatten().any(|m| m.is_empty()) {
            "an empty marker"
        } else {
            return Ok(());
        };
        Err(ConfigError::Invalid(format!(
            "classifier.rules[{index}] ({}) has {problem}",
            self.status.as_code()
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub title: String,
    pub owner_label: String,
    pub school_label: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            owner_label: "Tilhører:".into(),
            school_label: "Skole:".into(),
        }
    }
}
