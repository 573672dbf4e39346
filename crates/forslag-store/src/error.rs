use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported table format: {0} (expected .csv, .parquet, .arrow or .ipc)")]
    UnsupportedFormat(PathBuf),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has unexpected type {found}")]
    ColumnType { column: String, found: String },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
