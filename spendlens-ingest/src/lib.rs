//! spendlens-ingest: CSV transport for expense data (read raw rows, export records).

pub mod error;
pub mod export;
pub mod reader;

pub use error::{IngestError, Result};
pub use export::{export_filename, export_to_string, write_csv};
pub use reader::{load_expenses, load_expenses_from_str, read_rows, read_rows_from_path};
