//! Month and year summaries built from the aggregator.
//!
//! Period membership uses each record's supplied `month`/`year` fields,
//! never the month of its `date`.

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    by_category, by_day, by_mode, total_amount, CategoryTotal, DailyTotal, ModeTotal,
};
use crate::expense::ExpenseRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: String,
    pub year: i32,
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
    pub modes: Vec<ModeTotal>,
    /// One entry per calendar day of the month
    pub daily_totals: Vec<DailyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub total: f64,
    /// One entry per distinct month name seen, in first-seen order
    pub monthly_totals: Vec<MonthlyTotal>,
}

/// Summarize one month. `month` matches case-insensitively.
pub fn month_summary(records: &[ExpenseRecord], month: &str, year: i32) -> MonthSummary {
    let in_month: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| r.in_period(month, year))
        .cloned()
        .collect();

    MonthSummary {
        month: month.to_string(),
        year,
        total: total_amount(&in_month),
        categories: by_category(&in_month),
        modes: by_mode(&in_month),
        daily_totals: by_day(&in_month, month, year),
    }
}

/// Summarize one year as per-month totals.
///
/// Months come from the data, not a fixed calendar: a year with only
/// March and June records yields two entries.
pub fn year_summary(records: &[ExpenseRecord], year: i32) -> YearSummary {
    let in_year: Vec<ExpenseRecord> = records.iter().filter(|r| r.year == year).cloned().collect();

    let mut months: Vec<&str> = Vec::new();
    for r in &in_year {
        if !months.contains(&r.month.as_str()) {
            months.push(&r.month);
        }
    }

    let monthly_totals = months
        .into_iter()
        .map(|month| {
            let in_month: Vec<ExpenseRecord> = in_year
                .iter()
                .filter(|r| r.month.eq_ignore_ascii_case(month))
                .cloned()
                .collect();
            MonthlyTotal {
                month: month.to_string(),
                total: total_amount(&in_month),
                categories: by_category(&in_month),
            }
        })
        .collect();

    YearSummary {
        year,
        total: total_amount(&in_year),
        monthly_totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new(1200.0, d(2024, 6, 15), "Food", "CC"),
            ExpenseRecord::new(800.0, d(2024, 6, 20), "Commute", "Debit"),
            ExpenseRecord::new(500.0, d(2024, 5, 3), "Food", "UPI"),
            ExpenseRecord::new(90.0, d(2023, 6, 1), "Food", "UPI"),
        ]
    }

    #[test]
    fn test_month_summary_scenario() {
        let s = month_summary(&records(), "June", 2024);
        assert_eq!(s.total, 2000.0);
        assert_eq!(
            s.categories,
            vec![
                CategoryTotal { category: "Food".into(), total: 1200.0, percentage: 60.0 },
                CategoryTotal { category: "Commute".into(), total: 800.0, percentage: 40.0 },
            ]
        );
        assert_eq!(s.modes.len(), 2);
        assert_eq!(s.daily_totals.len(), 30);
        assert_eq!(s.daily_totals[14].total, 1200.0);
        assert_eq!(s.daily_totals[19].total, 800.0);
        let others: f64 = s
            .daily_totals
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 14 && *i != 19)
            .map(|(_, t)| t.total)
            .sum();
        assert_eq!(others, 0.0);
    }

    #[test]
    fn test_month_summary_case_insensitive_month() {
        let s = month_summary(&records(), "jUNE", 2024);
        assert_eq!(s.total, 2000.0);
        assert_eq!(s.month, "jUNE");
    }

    #[test]
    fn test_month_summary_uses_supplied_period_fields() {
        let recs = vec![ExpenseRecord::new(70.0, d(2024, 7, 2), "Food", "CC").with_period("June", 2024)];
        let s = month_summary(&recs, "June", 2024);
        assert_eq!(s.total, 70.0);
        assert_eq!(s.categories[0].total, 70.0);
        // Its date is in July, so the June grid does not show it.
        assert!(s.daily_totals.iter().all(|t| t.total == 0.0));
    }

    #[test]
    fn test_empty_month_is_zero_filled() {
        let s = month_summary(&[], "February", 2024);
        assert_eq!(s.total, 0.0);
        assert!(s.categories.is_empty());
        assert!(s.modes.is_empty());
        assert_eq!(s.daily_totals.len(), 29);
    }

    #[test]
    fn test_year_summary_distinct_months() {
        let y = year_summary(&records(), 2024);
        assert_eq!(y.total, 2500.0);
        let months: Vec<_> = y.monthly_totals.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["June", "May"]);
        assert_eq!(y.monthly_totals[0].total, 2000.0);
        assert_eq!(y.monthly_totals[1].categories[0].category, "Food");
    }

    #[test]
    fn test_year_summary_month_spelling_variants() {
        // Distinct spellings get their own entry, each matching case-insensitively.
        let recs = vec![
            ExpenseRecord::new(10.0, d(2024, 6, 1), "Food", "CC").with_period("June", 2024),
            ExpenseRecord::new(5.0, d(2024, 6, 2), "Food", "CC").with_period("june", 2024),
        ];
        let y = year_summary(&recs, 2024);
        assert_eq!(y.monthly_totals.len(), 2);
        assert_eq!(y.monthly_totals[0].total, 15.0);
        assert_eq!(y.monthly_totals[1].total, 15.0);
        assert_eq!(y.total, 15.0);
    }

    #[test]
    fn test_empty_year() {
        let y = year_summary(&records(), 2019);
        assert_eq!(y.total, 0.0);
        assert!(y.monthly_totals.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        let s = month_summary(&records(), "June", 2024);
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("dailyTotals").is_some());
        assert_eq!(v["categories"][0]["category"], "Food");
        assert_eq!(v["dailyTotals"][0]["date"], "2024-06-01");
        let y = serde_json::to_value(year_summary(&records(), 2024)).unwrap();
        assert!(y.get("monthlyTotals").is_some());
    }
}
