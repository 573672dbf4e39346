//! Proposal records before and after normalization.

use serde::{Deserialize, Serialize};

use crate::recommendation;
use crate::status::StatusCode;
use crate::votes::VoteTally;

/// One row of the raw proposal export.
///
/// Fields are optional because the export is hand-maintained: any cell may be
/// blank. Structural validation happens in [`crate::normalize_row`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProposalRow {
    pub id: Option<String>,
    pub proposer_name: Option<String>,
    pub school: Option<String>,
    pub change_type: Option<String>,
    pub location: Option<String>,
    pub change_text: Option<String>,
    /// Free-text committee recommendation, e.g. "Innstilt vedtatt (10-0-0)".
    pub decision_text: Option<String>,
}

/// A proposal with its decision text reduced to a status code and tally.
///
/// Identifying and change fields are copied verbatim from the raw row.
/// `votes` stays zero for statuses that do not carry a vote;
/// `alternative_label` is only set for [`StatusCode::RejectedInFavorOf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub proposer_name: String,
    pub school: String,
    pub change_type: String,
    pub location: String,
    pub change_text: String,
    pub status: StatusCode,
    pub votes: VoteTally,
    pub alternative_label: Option<String>,
}

impl NormalizedRecord {
    /// Human-readable recommendation sentence, e.g. "Innstilt vedtatt (10-0-0)".
    pub fn recommendation(&self) -> String {
        recommendation::render(self.status, &self.votes, self.alternative_label.as_deref())
    }

    /// Paragraphs of the change text, split on line breaks.
    pub fn change_paragraphs(&self) -> impl Iterator<Item = &str> {
        self.change_text.lines().map(str::trim_end)
    }
}
