//! CSV export of normalized records.
//!
//! Uses the import header names so an export can be loaded again. Amounts are
//! written as whole-rupee currency text, so fractional amounts do not survive.

use chrono::NaiveDate;
use serde::Serialize;
use spendlens_core::{format_currency, ExpenseRecord, DATE_FORMAT};
use std::io::Write;

use crate::error::Result;

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Amount Paid To")]
    paid_to: &'a str,
    #[serde(rename = "Label")]
    label: &'a str,
    #[serde(rename = "ToD")]
    time_of_day: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Month")]
    month: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Mode")]
    mode: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> From<&'a ExpenseRecord> for ExportRow<'a> {
    fn from(r: &'a ExpenseRecord) -> Self {
        Self {
            amount: format_currency(r.amount),
            paid_to: &r.payee,
            label: &r.category,
            time_of_day: &r.time_of_day,
            date: r.date.format(DATE_FORMAT).to_string(),
            month: &r.month,
            year: r.year,
            time: &r.time,
            mode: &r.payment_mode,
            notes: &r.notes,
        }
    }
}

/// Write records as CSV. Nothing is written for an empty slice.
pub fn write_csv<W: Write>(out: W, records: &[ExpenseRecord]) -> Result<()> {
    let mut wrt = csv::WriterBuilder::new().from_writer(out);
    for r in records {
        wrt.serialize(ExportRow::from(r))?;
    }
    wrt.flush()?;
    Ok(())
}

pub fn export_to_string(records: &[ExpenseRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(String::from_utf8(buf)?)
}

/// Default download name, e.g. `expense-data-2024-06-30.csv`.
pub fn export_filename(today: NaiveDate) -> String {
    format!("expense-data-{}.csv", today.format("%Y-%m-%d"))
}
