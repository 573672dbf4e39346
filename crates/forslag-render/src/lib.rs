//! Print-ready deliberation documents.
//!
//! A document is a title page with fill-in fields for the delegate, followed
//! by one block per proposal carrying the proposer, location, For/Mot
//! checkboxes, the change text and the committee recommendation.

use std::fmt;
use std::str::FromStr;

use forslag_core::NormalizedRecord;
use forslag_core::config::DocumentConfig;

mod markdown;
mod text;

pub use markdown::MarkdownDocument;
pub use text::PlainTextDocument;

/// Fill-in line printed after each title page label.
pub const FILL_IN: &str = "____________________________";

/// Anything that turns normalized records into document bytes.
///
/// Rendering is pure: the same title and records always give the same bytes.
pub trait DocumentSink {
    fn render(&self, title: &str, records: &[NormalizedRecord]) -> Vec<u8>;
}

/// Labels for the title page form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePage {
    pub owner_label: String,
    pub school_label: String,
}

impl Default for TitlePage {
    fn default() -> Self {
        Self::from(&DocumentConfig::default())
    }
}

impl From<&DocumentConfig> for TitlePage {
    fn from(config: &DocumentConfig) -> Self {
        Self {
            owner_label: config.owner_label.clone(),
            school_label: config.school_label.clone(),
        }
    }
}

/// Output document kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Text,
    Markdown,
}

impl DocumentFormat {
    pub fn sink(self, title_page: TitlePage) -> Box<dyn DocumentSink> {
        match self {
            Self::Text => Box::new(PlainTextDocument::new(title_page)),
            Self::Markdown => Box::new(MarkdownDocument::new(title_page)),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document format: {0:?} (expected text or markdown)")]
pub struct UnknownFormat(pub String);

impl FromStr for DocumentFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use forslag_core::{NormalizedRecord, StatusCode, VoteTally};

    pub fn adopted() -> NormalizedRecord {
        NormalizedRecord {
            id: "F1".into(),
            proposer_name: "Kari Nordmann".into(),
            school: "Oslo katedralskole".into(),
            change_type: "Endring".into(),
            location: "3.2".into(),
            change_text: "Stryk andre ledd.\nErstatt med: «Alle elever»".into(),
            status: StatusCode::Adopted,
            votes: VoteTally::new(10, 0, 0),
            alternative_label: None,
        }
    }

    pub fn rejected_in_favor() -> NormalizedRecord {
        NormalizedRecord {
            id: "F2".into(),
            proposer_name: "Ola".into(),
            school: "Bergen katedralskole".into(),
            change_type: "Tillegg".into(),
            location: "4".into(),
            change_text: String::new(),
            status: StatusCode::RejectedInFavorOf,
            votes: VoteTally::new(2, 5, 0),
            alternative_label: Some("F1".into()),
        }
    }

    pub fn records() -> Vec<NormalizedRecord> {
        vec![adopted(), rejected_in_favor()]
    }
}
