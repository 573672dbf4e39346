//! The intermediate normalized proposal table.
//!
//! Written once by the normalizer and read back by the renderer. Column order
//! follows [`normalized::COLUMNS`].

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, StringArray, UInt32Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, UInt32Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use forslag_core::{NormalizedRecord, RowError, StatusCode, VoteTally, normalized};
use tracing::{info, warn};

use crate::StoreError;
use crate::format::{
    TableFormat, as_utf8, cell, find_column, read_csv, read_ipc, read_parquet, write_batch,
};

/// Records read back from a table, plus the rows that could not be decoded.
#[derive(Debug, Default)]
pub struct RecordsRead {
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<RowError>,
    /// Rows kept as [`StatusCode::Unrecognized`] because their status code
    /// is unknown.
    pub unrecognized: Vec<RowError>,
}

/// Build one RecordBatch from records, in order.
pub fn records_to_batch(records: &[NormalizedRecord]) -> Result<RecordBatch, ArrowError> {
    let strings = |f: fn(&NormalizedRecord) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(records.iter().map(f)))
    };
    let counts = |f: fn(&VoteTally) -> u32| -> ArrayRef {
        Arc::new(UInt32Array::from_iter_values(records.iter().map(|r| f(&r.votes))))
    };

    let status: Vec<String> = records.iter().map(|r| r.status.to_string()).collect();
    let alternative: StringArray = records
        .iter()
        .map(|r| r.alternative_label.as_deref())
        .collect();

    let columns: Vec<ArrayRef> = vec![
        strings(|r| r.id.as_str()),
        strings(|r| r.proposer_name.as_str()),
        strings(|r| r.school.as_str()),
        strings(|r| r.change_type.as_str()),
        strings(|r| r.location.as_str()),
        strings(|r| r.change_text.as_str()),
        Arc::new(StringArray::from(status)),
        counts(|v| v.votes_for),
        counts(|v| v.against),
        counts(|v| v.abstain),
        Arc::new(alternative),
    ];

    RecordBatch::try_new(Arc::new(normalized::proposal_schema()), columns)
}

/// Write records to `path`, format chosen by extension. Replaces the file.
pub fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<(), StoreError> {
    let format = TableFormat::from_path(path)?;
    let batch = records_to_batch(records)?;
    write_batch(path, format, &batch)?;
    info!(path = %path.display(), rows = records.len(), ?format, "wrote normalized table");
    Ok(())
}

/// Read records back from a normalized table.
///
/// Rows with a blank id or an unreadable vote count are skipped and reported
/// in [`RecordsRead::skipped`]. A row with an unknown status code is kept as
/// [`StatusCode::Unrecognized`] and reported in [`RecordsRead::unrecognized`].
/// Null vote counts read as 0.
pub fn read_records(path: &Path) -> Result<RecordsRead, StoreError> {
    let batches = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path, Some(csv_schema()))?,
        TableFormat::Parquet => read_parquet(path)?,
        TableFormat::Ipc => read_ipc(path)?,
    };

    let mut read = RecordsRead::default();
    let mut offset = 0;
    for batch in &batches {
        records_from_batch(batch, offset, &mut read)?;
        offset += batch.num_rows();
    }

    for e in &read.skipped {
        warn!(error = %e, "skipping stored row");
    }
    for e in &read.unrecognized {
        warn!(error = %e, "keeping stored row with unrecognized status");
    }
    info!(
        path = %path.display(),
        records = read.records.len(),
        skipped = read.skipped.len(),
        unrecognized = read.unrecognized.len(),
        "read normalized table"
    );
    Ok(read)
}

/// The table columns as nullable text, so blank or malformed cells in a
/// hand-edited CSV reach row-level validation instead of failing the read.
fn csv_schema() -> SchemaRef {
    let fields: Vec<Field> = normalized::COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Decode one batch. `offset` is the index of the batch's first row in the table.
pub fn records_from_batch(
    batch: &RecordBatch,
    offset: usize,
    out: &mut RecordsRead,
) -> Result<(), StoreError> {
    let text = |name: &str| -> Result<ArrayRef, StoreError> {
        let col = find_column(batch, name).ok_or_else(|| StoreError::MissingColumn(name.into()))?;
        as_utf8(&col, name)
    };
    let id = text(normalized::ID)?;
    let name = text(normalized::NAME)?;
    let school = text(normalized::SCHOOL)?;
    let change_type = text(normalized::CHANGE_TYPE)?;
    let location = text(normalized::LOCATION)?;
    let change_text = text(normalized::CHANGE_TEXT)?;
    let status = text(normalized::STATUS_CODE)?;
    let alternative = text(normalized::ALTERNATIVE_LABEL)?;
    let votes_for = VoteColumn::new(batch, normalized::VOTES_FOR)?;
    let votes_against = VoteColumn::new(batch, normalized::VOTES_AGAINST)?;
    let votes_abstain = VoteColumn::new(batch, normalized::VOTES_ABSTAIN)?;

    for i in 0..batch.num_rows() {
        let row = offset + i;
        let or_empty = |col: &ArrayRef| cell(col, i).unwrap_or_default().to_string();

        let Some(record_id) = cell(&id, i).filter(|s| !s.trim().is_empty()) else {
            out.skipped.push(RowError::MissingField { row, field: normalized::ID });
            continue;
        };

        let code = cell(&status, i).unwrap_or_default();
        let status_code = StatusCode::from_code(code).unwrap_or(StatusCode::Unrecognized);

        let votes = match (votes_for.get(row, i), votes_against.get(row, i), votes_abstain.get(row, i)) {
            (Ok(f), Ok(a), Ok(b)) => VoteTally::new(f, a, b),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                out.skipped.push(e);
                continue;
            }
        };

        if status_code == StatusCode::Unrecognized {
            out.unrecognized.push(RowError::UnknownStatus {
                row,
                code: code.to_string(),
            });
        }
        out.records.push(NormalizedRecord {
            id: record_id.to_string(),
            proposer_name: or_empty(&name),
            school: or_empty(&school),
            change_type: or_empty(&change_type),
            location: or_empty(&location),
            change_text: or_empty(&change_text),
            status: status_code,
            votes,
            alternative_label: cell(&alternative, i)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        });
    }
    Ok(())
}

/// A vote count column cast to UInt32, keeping the original for error text.
struct VoteColumn {
    name: &'static str,
    original: ArrayRef,
    counts: ArrayRef,
}

impl VoteColumn {
    fn new(batch: &RecordBatch, name: &'static str) -> Result<Self, StoreError> {
        let original = find_column(batch, name).ok_or_else(|| StoreError::MissingColumn(name.into()))?;
        let counts = cast(&original, &DataType::UInt32).map_err(|_| StoreError::ColumnType {
            column: name.to_string(),
            found: original.data_type().to_string(),
        })?;
        Ok(Self {
            name,
            original,
            counts,
        })
    }

    /// Count at batch index `i`; null is 0, a value that failed the cast is an error.
    fn get(&self, row: usize, i: usize) -> Result<u32, RowError> {
        if self.original.is_null(i) {
            return Ok(0);
        }
        if self.counts.is_null(i) {
            let value = as_utf8(&self.original, self.name)
                .ok()
                .and_then(|c| cell(&c, i).map(str::to_string))
                .unwrap_or_default();
            return Err(RowError::InvalidVoteCount {
                row,
                field: self.name,
                value,
            });
        }
        Ok(self.counts.as_primitive::<UInt32Type>().value(i))
    }
}
