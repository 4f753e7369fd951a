//! Expense record types and the row normalizer.
//!
//! Input rows arrive string-typed from the CSV transport. Normalization is
//! lenient: blank lines are dropped, bad fields fall back to defaults.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use regex::Regex;
use std::sync::LazyLock;

use crate::currency::parse_amount;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_MODE: &str = "Unknown";

/// Day/month/year layout of the `Date` column.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One row as exported by the expense tracker, before any typing.
///
/// Built by the CSV reader, which resolves columns by header name and fills
/// absent columns with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub amount: String,
    pub paid_to: String,
    pub label: String,
    pub time_of_day: String,
    pub date: String,
    pub month: String,
    pub year: String,
    pub time: String,
    pub mode: String,
    pub notes: String,
}

/// A normalized expense transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Non-negative amount in whole currency units (fractions allowed)
    pub amount: f64,
    /// Who was paid
    pub payee: String,
    /// User label, "Uncategorized" when blank
    pub category: String,
    /// Morning/Evening style tag, free text
    pub time_of_day: String,
    /// Transaction day. Falls back to "today" when the source is unparseable.
    pub date: NaiveDate,
    /// Month name as supplied. Not derived from `date`.
    pub month: String,
    /// Year as supplied. Not derived from `date`.
    pub year: i32,
    pub time: String,
    /// Payment instrument, "Unknown" when blank
    pub payment_mode: String,
    pub notes: String,
}

impl ExpenseRecord {
    /// Build a record with default text fields, mostly useful in tests and fixtures.
    pub fn new(
        amount: f64,
        date: NaiveDate,
        category: impl Into<String>,
        payment_mode: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            payee: String::new(),
            category: category.into(),
            time_of_day: String::new(),
            date,
            month: date.format("%B").to_string(),
            year: date.year(),
            time: String::new(),
            payment_mode: payment_mode.into(),
            notes: String::new(),
        }
    }

    pub fn with_period(mut self, month: impl Into<String>, year: i32) -> Self {
        self.month = month.into();
        self.year = year;
        self
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = payee.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// True when the supplied (month, year) names the given period.
    /// Month names compare case-insensitively.
    pub fn in_period(&self, month: &str, year: i32) -> bool {
        self.year == year && self.month.eq_ignore_ascii_case(month)
    }
}

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("static regex"));

/// Leading integer of a year cell, so "2024.0" and "2024 (FY)" read as 2024.
fn parse_year(s: &str) -> Option<i32> {
    YEAR_RE.find(s.trim())?.as_str().parse().ok()
}

/// Parse a `dd/mm/yyyy` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Normalize rows using the local clock for the date/year fallback.
pub fn normalize(rows: &[RawRecord]) -> Vec<ExpenseRecord> {
    normalize_as_of(rows, Local::now().date_naive())
}

/// Normalize rows into typed records.
///
/// Rows with a blank `Amount` or `Date` are dropped. An unparseable date
/// becomes `today` and an unparseable year becomes `today.year()`.
pub fn normalize_as_of(rows: &[RawRecord], today: NaiveDate) -> Vec<ExpenseRecord> {
    let mut out = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        if row.amount.trim().is_empty() || row.date.trim().is_empty() {
            dropped += 1;
            continue;
        }
        out.push(normalize_row(row, today));
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = out.len(), "dropped blank expense rows");
    }

    out
}

fn normalize_row(row: &RawRecord, today: NaiveDate) -> ExpenseRecord {
    let date = match parse_date(&row.date) {
        Some(d) => d,
        None => {
            // Lenient on purpose: the record stays, dated today.
            tracing::warn!(raw = %row.date, fallback = %today, "unparseable expense date");
            today
        }
    };

    ExpenseRecord {
        amount: parse_amount(&row.amount),
        payee: row.paid_to.trim().to_string(),
        category: or_default(&row.label, DEFAULT_CATEGORY),
        time_of_day: row.time_of_day.trim().to_string(),
        date,
        month: row.month.trim().to_string(),
        year: parse_year(&row.year).unwrap_or_else(|| today.year()),
        time: row.time.trim().to_string(),
        payment_mode: or_default(&row.mode, DEFAULT_MODE),
        notes: row.notes.trim().to_string(),
    }
}

fn or_default(value: &str, default: &str) -> String {
    let v = value.trim();
    let chosen = if v.is_empty() { default } else { v };
    chosen.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount: &str, date: &str) -> RawRecord {
        RawRecord {
            amount: amount.to_string(),
            date: date.to_string(),
            month: "June".to_string(),
            year: "2024".to_string(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    #[test]
    fn test_normalize_typed_fields() {
        let row = RawRecord {
            amount: "₹1,200".to_string(),
            paid_to: " Dosa Corner ".to_string(),
            label: "Food".to_string(),
            time_of_day: "Evening".to_string(),
            date: "15/06/2024".to_string(),
            month: "June".to_string(),
            year: "2024".to_string(),
            time: "19:45".to_string(),
            mode: "CC".to_string(),
            notes: "team dinner".to_string(),
        };

        let recs = normalize_as_of(&[row], today());
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.amount, 1200.0);
        assert_eq!(r.payee, "Dosa Corner");
        assert_eq!(r.category, "Food");
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(r.month, "June");
        assert_eq!(r.year, 2024);
        assert_eq!(r.payment_mode, "CC");
        assert_eq!(r.notes, "team dinner");
    }

    #[test]
    fn test_blank_amount_row_is_dropped() {
        let recs = normalize_as_of(&[raw("", "15/06/2024"), raw("₹10", "16/06/2024")], today());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].amount, 10.0);
    }

    #[test]
    fn test_blank_date_row_is_dropped() {
        let recs = normalize_as_of(&[raw("₹10", "  ")], today());
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unparseable_date_falls_back_to_today() {
        // Known questionable behaviour: a corrupt date is indistinguishable from today.
        let recs = normalize_as_of(&[raw("₹250", "not-a-date")], today());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].date, today());
        assert_eq!(recs[0].amount, 250.0);
        // Period fields are still the supplied ones.
        assert_eq!(recs[0].month, "June");
        assert_eq!(recs[0].year, 2024);
    }

    #[test]
    fn test_clock_fallback_uses_local_today() {
        let before = Local::now().date_naive();
        let recs = normalize(&[raw("₹1", "31/31/2024")]);
        let after = Local::now().date_naive();
        assert!(recs[0].date == before || recs[0].date == after);
    }

    #[test]
    fn test_bad_amount_becomes_zero() {
        let recs = normalize_as_of(&[raw("abc", "01/06/2024")], today());
        assert_eq!(recs[0].amount, 0.0);
    }

    #[test]
    fn test_defaults_for_blank_fields() {
        let mut row = raw("₹5", "01/06/2024");
        row.year = "twenty".to_string();
        let r = &normalize_as_of(&[row], today())[0];
        assert_eq!(r.category, DEFAULT_CATEGORY);
        assert_eq!(r.payment_mode, DEFAULT_MODE);
        assert_eq!(r.year, 2026);
        assert_eq!(r.payee, "");
    }

    #[test]
    fn test_year_reads_leading_integer() {
        let mut row = raw("₹5", "01/06/2024");
        row.year = "2024.0".to_string();
        assert_eq!(normalize_as_of(&[row], today())[0].year, 2024);
        assert_eq!(parse_year(" 2023 "), Some(2023));
        assert_eq!(parse_year("FY2024"), None);
    }

    #[test]
    fn test_month_is_not_derived_from_date() {
        let mut row = raw("₹5", "01/07/2024");
        row.month = "June".to_string();
        let r = &normalize_as_of(&[row], today())[0];
        assert_eq!(r.month, "June");
        assert!(r.in_period("june", 2024));
        assert!(!r.in_period("July", 2024));
    }

    #[test]
    fn test_single_digit_day_and_month() {
        assert_eq!(parse_date("5/6/2024"), NaiveDate::from_ymd_opt(2024, 6, 5));
        assert_eq!(parse_date("2024-06-05"), None);
    }
}
