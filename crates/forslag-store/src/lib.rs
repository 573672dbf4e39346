//! Storage layer: raw proposal exports in, normalized proposal tables in and out.

mod error;
pub use error::StoreError;

mod format;
pub use format::{TableFormat, read_csv, read_ipc, read_parquet, write_batch};

mod raw;
pub use raw::{read_raw_rows, rows_from_batch};

mod table;
pub use table::{RecordsRead, read_records, records_from_batch, records_to_batch, write_records};
