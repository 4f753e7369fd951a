//! Grouped totals over a slice of expense records.
//!
//! Every call builds fresh output; percentages are shares of the records
//! passed in, not of the whole dataset.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::expense::ExpenseRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Share of the grouped sum, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTotal {
    pub mode: String,
    pub total: f64,
    /// Share of the grouped sum, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Sum of `amount` over the records.
pub fn total_amount(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Totals per category, largest first.
pub fn by_category(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    rollup(records, |r| &r.category)
        .into_iter()
        .map(|(category, total, percentage)| CategoryTotal {
            category,
            total,
            percentage,
        })
        .collect()
}

/// Totals per payment mode, largest first.
pub fn by_mode(records: &[ExpenseRecord]) -> Vec<ModeTotal> {
    rollup(records, |r| &r.payment_mode)
        .into_iter()
        .map(|(mode, total, percentage)| ModeTotal {
            mode,
            total,
            percentage,
        })
        .collect()
}

/// Group by an exact-match key. Output is sorted by total descending;
/// equal totals keep first-seen order.
fn rollup<'a, F>(records: &'a [ExpenseRecord], key: F) -> Vec<(String, f64, f64)>
where
    F: Fn(&'a ExpenseRecord) -> &'a String,
{
    let grand_total = total_amount(records);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for r in records {
        let k = key(r).as_str();
        match index.get(k) {
            Some(&i) => groups[i].1 += r.amount,
            None => {
                index.insert(k, groups.len());
                groups.push((k, r.amount));
            }
        }
    }

    // Stable, so ties stay in first-seen order.
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));

    groups
        .into_iter()
        .map(|(k, total)| {
            let percentage = if grand_total > 0.0 {
                total * 100.0 / grand_total
            } else {
                0.0
            };
            (k.to_string(), total, percentage)
        })
        .collect()
}

/// Resolve a month name ("June", "jun", "JUNE") to its calendar month.
pub fn parse_month(name: &str) -> Option<Month> {
    name.trim().parse::<Month>().ok()
}

/// Every calendar day of `month`/`year`, in order.
pub fn month_days(month: Month, year: i32) -> Vec<NaiveDate> {
    match NaiveDate::from_ymd_opt(year, month.number_from_month(), 1) {
        Some(first) => first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect(),
        None => Vec::new(),
    }
}

/// Daily totals over the full month grid, zero-filled.
///
/// Records land on the day equal to their `date`, whatever their own
/// month/year fields say. An unrecognised month name gives an empty grid.
pub fn by_day(records: &[ExpenseRecord], month: &str, year: i32) -> Vec<DailyTotal> {
    let Some(m) = parse_month(month) else {
        tracing::debug!(month, "unknown month name, empty day grid");
        return Vec::new();
    };

    let mut days: Vec<DailyTotal> = month_days(m, year)
        .into_iter()
        .map(|date| DailyTotal { date, total: 0.0 })
        .collect();

    let Some(first) = days.first().map(|d| d.date) else {
        return days;
    };

    for r in records {
        if r.date.year() == first.year() && r.date.month() == first.month() {
            days[r.date.day0() as usize].total += r.amount;
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new(1200.0, d(2024, 6, 15), "Food", "CC"),
            ExpenseRecord::new(800.0, d(2024, 6, 20), "Commute", "Debit"),
            ExpenseRecord::new(300.0, d(2024, 6, 20), "Food", "Debit"),
            ExpenseRecord::new(100.0, d(2024, 6, 2), "Misc", "UPI"),
        ]
    }

    #[test]
    fn test_by_category_sorted_with_shares() {
        let cats = by_category(&sample());
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0].category, "Food");
        assert_eq!(cats[0].total, 1500.0);
        assert_eq!(cats[0].percentage, 62.5);
        assert_eq!(cats[1].category, "Commute");
        assert_eq!(cats[2].category, "Misc");
    }

    #[test]
    fn test_group_sums_match_record_sum() {
        let recs = sample();
        let cat_sum: f64 = by_category(&recs).iter().map(|c| c.total).sum();
        let mode_sum: f64 = by_mode(&recs).iter().map(|m| m.total).sum();
        let pct_sum: f64 = by_mode(&recs).iter().map(|m| m.percentage).sum();
        assert!((cat_sum - total_amount(&recs)).abs() < 1e-9);
        assert!((mode_sum - total_amount(&recs)).abs() < 1e-9);
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let recs = vec![
            ExpenseRecord::new(10.0, d(2024, 1, 1), "food", "CC"),
            ExpenseRecord::new(10.0, d(2024, 1, 1), "Food", "CC"),
        ];
        assert_eq!(by_category(&recs).len(), 2);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let recs = vec![
            ExpenseRecord::new(50.0, d(2024, 1, 1), "B", "UPI"),
            ExpenseRecord::new(50.0, d(2024, 1, 2), "A", "CC"),
        ];
        let modes = by_mode(&recs);
        assert_eq!(modes[0].mode, "UPI");
        assert_eq!(modes[1].mode, "CC");
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let recs = vec![ExpenseRecord::new(0.0, d(2024, 1, 1), "Food", "CC")];
        let cats = by_category(&recs);
        assert_eq!(cats[0].percentage, 0.0);
        assert!(by_category(&[]).is_empty());
    }

    #[test]
    fn test_by_day_full_grid() {
        let days = by_day(&sample(), "June", 2024);
        assert_eq!(days.len(), 30);
        assert_eq!(days[0].date, d(2024, 6, 1));
        assert_eq!(days[14].total, 1200.0);
        assert_eq!(days[19].total, 1100.0);
        assert_eq!(days[1].total, 100.0);
        assert_eq!(days[29].total, 0.0);
    }

    #[test]
    fn test_by_day_lengths() {
        assert_eq!(by_day(&[], "february", 2024).len(), 29);
        assert_eq!(by_day(&[], "February", 2023).len(), 28);
        assert_eq!(by_day(&[], "Dec", 2023).len(), 31);
        assert!(by_day(&[], "Smarch", 2023).is_empty());
    }

    #[test]
    fn test_by_day_matches_on_date_not_period_fields() {
        let rec = ExpenseRecord::new(40.0, d(2024, 7, 3), "Food", "CC").with_period("June", 2024);
        let june = by_day(std::slice::from_ref(&rec), "June", 2024);
        assert!(june.iter().all(|t| t.total == 0.0));
        let july = by_day(&[rec], "July", 2024);
        assert_eq!(july[2].total, 40.0);
    }
}
