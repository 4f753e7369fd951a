//! Derived figures shown next to the summaries: headline stats, a trailing
//! moving average over the day grid, and month-over-month category deltas.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::aggregate::{parse_month, CategoryTotal, DailyTotal};
use crate::expense::ExpenseRecord;
use crate::summary::{MonthSummary, MonthlyTotal, YearSummary};

pub const DEFAULT_MA_WINDOW: usize = 3;
pub const COMPARISON_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub total: f64,
    /// Total divided by the number of days with any spend
    pub average_per_active_day: f64,
    pub highest_day: Option<DailyTotal>,
    pub top_category: Option<CategoryTotal>,
}

impl MonthStats {
    pub fn from_summary(summary: &MonthSummary) -> Self {
        let active_days = summary.daily_totals.iter().filter(|d| d.total > 0.0).count();
        let average_per_active_day = if active_days > 0 {
            summary.total / active_days as f64
        } else {
            0.0
        };

        // First strict maximum wins; an all-zero month has no highest day.
        let mut highest_day: Option<&DailyTotal> = None;
        for day in &summary.daily_totals {
            if day.total > highest_day.map_or(0.0, |h| h.total) {
                highest_day = Some(day);
            }
        }

        Self {
            total: summary.total,
            average_per_active_day,
            highest_day: highest_day.cloned(),
            top_category: summary.categories.first().cloned(),
        }
    }
}

/// Trailing mean over `window` days. Entries before the window fills are 0.
pub fn moving_average(days: &[DailyTotal], window: usize) -> Vec<f64> {
    if window == 0 {
        return vec![0.0; days.len()];
    }

    (0..days.len())
        .map(|i| {
            if i + 1 < window {
                return 0.0;
            }
            let sum: f64 = days[i + 1 - window..=i].iter().map(|d| d.total).sum();
            sum / window as f64
        })
        .collect()
}

/// Mean over every day of the grid, zero days included.
pub fn daily_mean(days: &[DailyTotal]) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    days.iter().map(|d| d.total).sum::<f64>() / days.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChange {
    pub category: String,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub current_month: String,
    pub previous_month: String,
    pub current_total: f64,
    pub previous_total: f64,
    /// Largest absolute changes first, at most [`COMPARISON_LIMIT`]
    pub categories: Vec<CategoryChange>,
}

/// Percent change from `previous` to `current`. A rise from zero counts as 100%.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    let change = current - previous;
    if previous != 0.0 {
        change / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Compare a month against the closest earlier month present in its year.
///
/// Months later in the year are never picked, even when they hold the only
/// other data.
///
/// Returns `None` when the year summary is for another year, the month name
/// is not a calendar month, or no earlier month has data.
pub fn compare_months(current: &MonthSummary, year: &YearSummary) -> Option<MonthComparison> {
    if current.year != year.year {
        return None;
    }
    let current_idx = parse_month(&current.month)?.number_from_month();

    let mut previous: Option<(u32, &MonthlyTotal)> = None;
    for m in &year.monthly_totals {
        let Some(idx) = parse_month(&m.month).map(|mm| mm.number_from_month()) else {
            continue;
        };
        if idx < current_idx && previous.is_none_or(|(best, _)| idx > best) {
            previous = Some((idx, m));
        }
    }
    let (_, previous) = previous?;

    let mut names: Vec<&str> = Vec::new();
    for c in current.categories.iter().chain(previous.categories.iter()) {
        if !names.contains(&c.category.as_str()) {
            names.push(&c.category);
        }
    }

    let lookup = |cats: &[CategoryTotal], name: &str| {
        cats.iter()
            .find(|c| c.category == name)
            .map_or(0.0, |c| c.total)
    };

    let mut categories: Vec<CategoryChange> = names
        .into_iter()
        .map(|name| {
            let cur = lookup(&current.categories, name);
            let prev = lookup(&previous.categories, name);
            CategoryChange {
                category: name.to_string(),
                current: cur,
                previous: prev,
                change: cur - prev,
                percent_change: percent_change(cur, prev),
            }
        })
        .collect();
    categories.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));
    categories.truncate(COMPARISON_LIMIT);

    Some(MonthComparison {
        current_month: current.month.clone(),
        previous_month: previous.month.clone(),
        current_total: current.total,
        previous_total: previous.total,
        categories,
    })
}

/// Month name and year of the most recent `date` in the set.
pub fn latest_period(records: &[ExpenseRecord]) -> Option<(String, i32)> {
    records
        .iter()
        .map(|r| r.date)
        .max()
        .map(|d| (d.format("%B").to_string(), d.year()))
}
