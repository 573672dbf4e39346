//! Reader for the raw proposal export.
//!
//! The export is a table with one proposal per row and free-form headers;
//! [`ColumnMap`] names the columns that matter. Everything is read as text.

use std::path::Path;

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use forslag_core::{ColumnMap, RawProposalRow};
use tracing::{info, warn};

use crate::StoreError;
use crate::format::{TableFormat, as_utf8, cell, find_column, read_csv, read_ipc, read_parquet};

/// Read all rows of a raw export (CSV, Parquet or Arrow IPC).
///
/// The `id` and `decision` columns must exist; other mapped columns are
/// optional and read as absent when missing from the header.
pub fn read_raw_rows(path: &Path, columns: &ColumnMap) -> Result<Vec<RawProposalRow>, StoreError> {
    let batches = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path, None)?,
        TableFormat::Parquet => read_parquet(path)?,
        TableFormat::Ipc => read_ipc(path)?,
    };

    let mut rows = Vec::new();
    for batch in &batches {
        rows.extend(rows_from_batch(batch, columns)?);
    }
    info!(path = %path.display(), rows = rows.len(), "read raw proposal export");
    Ok(rows)
}

/// Convert one batch of the raw export into rows.
pub fn rows_from_batch(
    batch: &RecordBatch,
    columns: &ColumnMap,
) -> Result<Vec<RawProposalRow>, StoreError> {
    let id = required(batch, &columns.id)?;
    let decision = required(batch, &columns.decision)?;
    let name = optional(batch, &columns.name)?;
    let school = optional(batch, &columns.school)?;
    let change_type = optional(batch, &columns.change_type)?;
    let location = optional(batch, &columns.location)?;
    let change_text = optional(batch, &columns.change_text)?;

    let text = |col: &Option<ArrayRef>, row: usize| -> Option<String> {
        col.as_ref().and_then(|c| cell(c, row)).map(str::to_string)
    };

    Ok((0..batch.num_rows())
        .map(|row| RawProposalRow {
            id: cell(&id, row).map(str::to_string),
            proposer_name: text(&name, row),
            school: text(&school, row),
            change_type: text(&change_type, row),
            location: text(&location, row),
            change_text: text(&change_text, row),
            decision_text: cell(&decision, row).map(str::to_string),
        })
        .collect())
}

fn required(batch: &RecordBatch, name: &str) -> Result<ArrayRef, StoreError> {
    let column = find_column(batch, name).ok_or_else(|| StoreError::MissingColumn(name.to_string()))?;
    as_utf8(&column, name)
}

fn optional(batch: &RecordBatch, name: &str) -> Result<Option<ArrayRef>, StoreError> {
    match find_column(batch, name) {
        Some(column) => Ok(Some(as_utf8(&column, name)?)),
        None => {
            warn!(column = name, "column not in export, treating as empty");
            Ok(None)
        }
    }
}
