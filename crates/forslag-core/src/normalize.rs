//! Per-row normalization: raw export rows in, normalized records out.
//!
//! Each row is decoded independently; a structurally broken row is reported
//! and skipped without stopping the batch.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::classify::{Classifier, Origin};
use crate::record::{NormalizedRecord, RawProposalRow};
use crate::status::StatusCode;

/// A row that could not be turned into a record.
///
/// `row` is the zero-based data row index (header excluded).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: unknown status code {code:?}")]
    UnknownStatus { row: usize, code: String },

    #[error("row {row}: invalid {field} value {value:?}")]
    InvalidVoteCount {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl RowError {
    pub fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. }
            | Self::UnknownStatus { row, .. }
            | Self::InvalidVoteCount { row, .. } => *row,
        }
    }
}

/// Output of a normalization pass.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Records in input order.
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<RowError>,
    /// Rows whose decision text was blank.
    pub blank_decisions: usize,
    /// Rows whose decision text matched no rule.
    pub fallbacks: usize,
}

impl NormalizeReport {
    /// Number of records per status.
    pub fn counts(&self) -> BTreeMap<StatusCode, usize> {
        count_by_status(&self.records)
    }
}

/// Number of records per status.
pub fn count_by_status<'a, I>(records: I) -> BTreeMap<StatusCode, usize>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

/// Normalize one row.
///
/// Only a blank or absent `id` is an error; every other field defaults to
/// empty and the decision text is always classifiable. All fields, `id`
/// included, are copied as given.
pub fn normalize_row(
    row: usize,
    raw: &RawProposalRow,
    classifier: &Classifier,
) -> Result<(NormalizedRecord, Origin), RowError> {
    let id = raw
        .id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(RowError::MissingField { row, field: "id" })?;

    let decision = classifier.decide(raw.decision_text.as_deref().unwrap_or_default());

    let record = NormalizedRecord {
        id: id.to_string(),
        proposer_name: raw.proposer_name.clone().unwrap_or_default(),
        school: raw.school.clone().unwrap_or_default(),
        change_type: raw.change_type.clone().unwrap_or_default(),
        location: raw.location.clone().unwrap_or_default(),
        change_text: raw.change_text.clone().unwrap_or_default(),
        status: decision.status,
        votes: decision.votes,
        alternative_label: decision.alternative,
    };
    Ok((record, decision.origin))
}

/// Normalize every row in order.
pub fn normalize_rows<'a, I>(rows: I, classifier: &Classifier) -> NormalizeReport
where
    I: IntoIterator<Item = &'a RawProposalRow>,
{
    let mut report = NormalizeReport::default();

    for (index, raw) in rows.into_iter().enumerate() {
        match normalize_row(index, raw, classifier) {
            Ok((record, origin)) => {
                match origin {
                    Origin::Blank => {
                        warn!(row = index, id = %record.id, "blank decision text");
                        report.blank_decisions += 1;
                    }
                    Origin::Fallback => {
                        warn!(
                            row = index,
                            id = %record.id,
                            "decision text matched no rule, using fallback"
                        );
                        report.fallbacks += 1;
                    }
                    Origin::Rule(_) => {}
                }
                report.records.push(record);
            }
            Err(e) => {
                warn!(row = index, error = %e, "skipping row");
                report.skipped.push(e);
            }
        }
    }

    info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        blank = report.blank_decisions,
        fallback = report.fallbacks,
        "normalized proposals"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votes::VoteTally;

    fn raw(id: Option<&str>, decision: Option<&str>) -> RawProposalRow {
        RawProposalRow {
            id: id.map(String::from),
            proposer_name: Some("Ola Nordmann".into()),
            school: Some("Bergen katedralskole".into()),
            change_type: Some("Tillegg".into()),
            location: Some("4.1".into()),
            change_text: Some("Legg til nytt punkt.".into()),
            decision_text: decision.map(String::from),
        }
    }

    #[test]
    fn fields_copied_verbatim() {
        let clf = Classifier::default();
        let (record, origin) =
            normalize_row(0, &raw(Some("F7"), Some("Innstilt vedtatt (8-1-0)")), &clf).unwrap();
        assert_eq!(record.id, "F7");
        assert_eq!(record.proposer_name, "Ola Nordmann");
        assert_eq!(record.school, "Bergen katedralskole");
        assert_eq!(record.change_type, "Tillegg");
        assert_eq!(record.location, "4.1");
        assert_eq!(record.change_text, "Legg til nytt punkt.");
        assert_eq!(record.status, StatusCode::Adopted);
        assert_eq!(record.votes, VoteTally::new(8, 1, 0));
        assert_eq!(origin, Origin::Rule(1));
    }

    #[test]
    fn id_is_not_trimmed() {
        let clf = Classifier::default();
        let (record, _) = normalize_row(0, &raw(Some(" F7 "), Some("vedtatt")), &clf).unwrap();
        assert_eq!(record.id, " F7 ");
    }

    #[test]
    fn missing_id_is_row_error() {
        let clf = Classifier::default();
        let err = normalize_row(3, &raw(None, Some("vedtatt")), &clf).unwrap_err();
        assert_eq!(err, RowError::MissingField { row: 3, field: "id" });
        assert_eq!(err.row(), 3);

        let err = normalize_row(4, &raw(Some("  "), Some("vedtatt")), &clf).unwrap_err();
        assert_eq!(err.row(), 4);
    }

    #[test]
    fn missing_decision_resolves_to_no_proposal() {
        let clf = Classifier::default();
        let (record, origin) = normalize_row(0, &raw(Some("F1"), None), &clf).unwrap();
        assert_eq!(record.status, StatusCode::NoProposal);
        assert_eq!(record.votes, VoteTally::default());
        assert_eq!(origin, Origin::Blank);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let clf = Classifier::default();
        let row = RawProposalRow {
            id: Some("F9".into()),
            decision_text: Some("Ivaretatt".into()),
            ..Default::default()
        };
        let (record, _) = normalize_row(0, &row, &clf).unwrap();
        assert_eq!(record.proposer_name, "");
        assert_eq!(record.change_text, "");
        assert_eq!(record.status, StatusCode::Preserved);
    }

    #[test]
    fn batch_keeps_order_and_skips_bad_rows() {
        let rows = vec![
            raw(Some("F1"), Some("Innstilt vedtatt (10-0-0)")),
            raw(None, Some("Innstilt avvist (0-9-1)")),
            raw(Some("F3"), Some("")),
            raw(Some("F4"), Some("Noe helt annet")),
            raw(Some("F5"), Some("Innstilling: avvist til fordel for F12 (3-2-1)")),
        ];
        let report = normalize_rows(&rows, &Classifier::default());

        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["F1", "F3", "F4", "F5"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row(), 1);
        assert_eq!(report.blank_decisions, 1);
        assert_eq!(report.fallbacks, 1);

        let counts = report.counts();
        assert_eq!(counts[&StatusCode::Adopted], 1);
        assert_eq!(counts[&StatusCode::NoProposal], 2);
        assert_eq!(counts[&StatusCode::RejectedInFavorOf], 1);
        assert!(!counts.contains_key(&StatusCode::Rejected));
    }

    #[test]
    fn every_row_with_id_yields_a_record() {
        let rows: Vec<RawProposalRow> = ["vedtatt", "", "???", "Ikke", "avist"]
            .iter()
            .enumerate()
            .map(|(i, d)| RawProposalRow {
                id: Some(format!("F{i}")),
                decision_text: Some(d.to_string()),
                ..Default::default()
            })
            .collect();
        let report = normalize_rows(&rows, &Classifier::default());
        assert_eq!(report.records.len(), rows.len());
        assert!(report.skipped.is_empty());
    }
}
