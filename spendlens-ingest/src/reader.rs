//! Read expense-tracker CSV exports.
//!
//! Header row required. Columns are matched by name, so order does not
//! matter; unknown columns are ignored and short rows are padded with blanks:
//! Amount,Amount Paid To,Label,ToD,Date,Month,Year,Time,Mode,Notes

use chrono::NaiveDate;
use spendlens_core::{normalize_as_of, ExpenseRecord, RawRecord};
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

fn builder() -> csv::ReaderBuilder {
    let mut b = csv::ReaderBuilder::new();
    b.flexible(true).trim(csv::Trim::All);
    b
}

/// Column positions resolved from the header row.
struct Columns {
    amount: Option<usize>,
    paid_to: Option<usize>,
    label: Option<usize>,
    time_of_day: Option<usize>,
    date: Option<usize>,
    month: Option<usize>,
    year: Option<usize>,
    time: Option<usize>,
    mode: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let col = |name: &str| headers.iter().position(|h| h == name);
        Self {
            amount: col("Amount"),
            paid_to: col("Amount Paid To"),
            label: col("Label"),
            time_of_day: col("ToD"),
            date: col("Date"),
            month: col("Month"),
            year: col("Year"),
            time: col("Time"),
            mode: col("Mode"),
            notes: col("Notes"),
        }
    }

    fn raw(&self, record: &csv::StringRecord) -> RawRecord {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string()
        };
        RawRecord {
            amount: get(self.amount),
            paid_to: get(self.paid_to),
            label: get(self.label),
            time_of_day: get(self.time_of_day),
            date: get(self.date),
            month: get(self.month),
            year: get(self.year),
            time: get(self.time),
            mode: get(self.mode),
            notes: get(self.notes),
        }
    }
}

fn collect_rows<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let columns = Columns::from_headers(rdr.headers()?);
    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(columns.raw(&result?));
    }
    Ok(rows)
}

/// Parse CSV text from any reader into raw rows.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    collect_rows(&mut builder().from_reader(input))
}

/// Parse a CSV file into raw rows.
pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let mut rdr = builder().from_path(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = collect_rows(&mut rdr)?;
    tracing::debug!(rows = rows.len(), path = %path.display(), "read expense rows");
    Ok(rows)
}

/// Parse CSV text and normalize it in one step.
pub fn load_expenses_from_str(text: &str, today: NaiveDate) -> Result<Vec<ExpenseRecord>> {
    let rows = read_rows(text.as_bytes())?;
    let records = normalize_as_of(&rows, today);
    tracing::info!(rows = rows.len(), records = records.len(), "loaded expenses");
    Ok(records)
}

/// Read a CSV file and normalize it.
pub fn load_expenses(path: impl AsRef<Path>, today: NaiveDate) -> Result<Vec<ExpenseRecord>> {
    let rows = read_rows_from_path(path.as_ref())?;
    let records = normalize_as_of(&rows, today);
    tracing::info!(
        rows = rows.len(),
        records = records.len(),
        path = %path.as_ref().display(),
        "loaded expenses"
    );
    Ok(records)
}
