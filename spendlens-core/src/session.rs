//! Session state: the loaded dataset, the active filters and the selected
//! period. Views are recomputed by calling [`Session::view`] after any change.

use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;
use crate::filter::{apply_filters, FilterOptions, Filters};
use crate::insights::{compare_months, latest_period, MonthComparison, MonthStats};
use crate::summary::{month_summary, year_summary, MonthSummary, YearSummary};

/// Everything the dashboard shows for one (filters, period) state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub month: MonthSummary,
    pub year: YearSummary,
    pub stats: MonthStats,
    pub comparison: Option<MonthComparison>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    expenses: Vec<ExpenseRecord>,
    filters: Filters,
    period: Option<(String, i32)>,
}

impl Session {
    pub fn new(expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            expenses,
            ..Default::default()
        }
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    /// Pin the month/year to summarize. `None` goes back to "latest".
    pub fn select_period(&mut self, period: Option<(String, i32)>) {
        self.period = period;
    }

    /// The filtered working set.
    pub fn filtered(&self) -> Vec<ExpenseRecord> {
        apply_filters(&self.expenses, &self.filters)
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.filtered())
    }

    /// Selected period, else the month of the latest filtered record.
    pub fn period(&self) -> Option<(String, i32)> {
        self.period
            .clone()
            .or_else(|| latest_period(&self.filtered()))
    }

    /// Recompute every summary for the current state.
    pub fn view(&self) -> Option<DashboardView> {
        let filtered = self.filtered();
        let (month, year) = match &self.period {
            Some(p) => p.clone(),
            None => latest_period(&filtered)?,
        };

        let month = month_summary(&filtered, &month, year);
        let year = year_summary(&filtered, year);
        let stats = MonthStats::from_summary(&month);
        let comparison = compare_months(&month, &year);

        Some(DashboardView {
            month,
            year,
            stats,
            comparison,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn session() -> Session {
        Session::new(vec![
            ExpenseRecord::new(500.0, d(5, 3), "Food", "UPI"),
            ExpenseRecord::new(1200.0, d(6, 15), "Food", "CC"),
            ExpenseRecord::new(800.0, d(6, 20), "Commute", "Debit"),
        ])
    }

    #[test]
    fn test_view_defaults_to_latest_period() {
        let s = session();
        assert_eq!(s.period(), Some(("June".to_string(), 2024)));
        let view = s.view().unwrap();
        assert_eq!(view.month.total, 2000.0);
        assert_eq!(view.year.total, 2500.0);
        assert_eq!(view.comparison.unwrap().previous_month, "May");
    }

    #[test]
    fn test_view_follows_filters() {
        let mut s = session();
        s.set_filters(Filters::default().with_modes(["UPI"]));
        assert!(s.filters().modes.contains("UPI"));
        let view = s.view().unwrap();
        assert_eq!(view.month.month, "May");
        assert_eq!(view.month.total, 500.0);
        assert_eq!(s.options().modes, vec!["UPI"]);
    }

    #[test]
    fn test_selected_period_wins() {
        let mut s = session();
        s.select_period(Some(("May".to_string(), 2024)));
        let view = s.view().unwrap();
        assert_eq!(view.month.total, 500.0);
        assert!(view.comparison.is_none());
        assert_eq!(view.month.daily_totals.len(), 31);
    }

    #[test]
    fn test_empty_session_has_no_view() {
        assert!(Session::new(Vec::new()).view().is_none());
        let mut s = session();
        s.set_filters(Filters::default().with_categories(["Travel"]));
        assert!(s.view().is_none());
        assert_eq!(s.expenses().len(), 3);
    }

    #[test]
    fn test_repeated_views_are_identical() {
        let s = session();
        assert_eq!(s.view(), s.view());
    }
}
