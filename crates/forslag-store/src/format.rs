//! File formats and batch-level readers/writers.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

use crate::StoreError;

/// Supported table formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
    /// Arrow IPC file format (`.arrow` / `.ipc`).
    Ipc,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            Some("arrow") | Some("ipc") => Ok(Self::Ipc),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn open(path: &Path) -> Result<File, StoreError> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Read an Arrow IPC file into RecordBatches.
pub fn read_ipc(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = open(path)?;
    let reader = arrow::ipc::reader::FileReader::try_new(file, None)?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Read a CSV file with a header row.
///
/// With `schema = None`, every column is read as nullable Utf8 under its
/// header name. With a schema, columns are taken positionally and typed.
/// A row with fewer fields than the header reads its missing trailing cells
/// as null, so one short row never fails the file.
pub fn read_csv(path: &Path, schema: Option<SchemaRef>) -> Result<Vec<RecordBatch>, StoreError> {
    let mut file = open(path)?;

    let schema = match schema {
        Some(s) => s,
        None => {
            let (inferred, _) = arrow::csv::reader::Format::default()
                .with_header(true)
                .infer_schema(&mut file, Some(0))?;
            file.rewind()?;
            let fields: Vec<Field> = inferred
                .fields()
                .iter()
                .map(|f| Field::new(f.name(), DataType::Utf8, true))
                .collect();
            Arc::new(Schema::new(fields))
        }
    };
    debug!(path = %path.display(), columns = schema.fields().len(), "reading csv");

    let reader = arrow::csv::ReaderBuilder::new(schema)
        .with_header(true)
        .with_truncated_rows(true)
        .build(file)?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Write a single batch, replacing any existing file.
pub fn write_batch(path: &Path, format: TableFormat, batch: &RecordBatch) -> Result<(), StoreError> {
    let file = File::create(path)?;
    match format {
        TableFormat::Parquet => {
            let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
            writer.write(batch)?;
            writer.close()?;
        }
        TableFormat::Ipc => {
            let mut writer = arrow::ipc::writer::FileWriter::try_new(file, &batch.schema())?;
            writer.write(batch)?;
            writer.finish()?;
        }
        TableFormat::Csv => {
            let mut writer = arrow::csv::WriterBuilder::new().with_header(true).build(file);
            writer.write(batch)?;
        }
    }
    Ok(())
}

// ── Column access ──

/// Find a column by header name, ignoring surrounding whitespace.
pub(crate) fn find_column(batch: &RecordBatch, name: &str) -> Option<ArrayRef> {
    let wanted = name.trim();
    let schema = batch.schema();
    let idx = schema
        .fields()
        .iter()
        .position(|f| f.name().trim() == wanted)?;
    Some(batch.column(idx).clone())
}

/// Cast any column to Utf8 so cells can be read as strings.
pub(crate) fn as_utf8(column: &ArrayRef, name: &str) -> Result<ArrayRef, StoreError> {
    cast(column, &DataType::Utf8).map_err(|_| StoreError::ColumnType {
        column: name.to_string(),
        found: column.data_type().to_string(),
    })
}

/// String value of a Utf8 column cell; null becomes `None`.
pub(crate) fn cell(column: &ArrayRef, row: usize) -> Option<&str> {
    if column.is_null(row) {
        return None;
    }
    Some(column.as_string::<i32>().value(row))
}
