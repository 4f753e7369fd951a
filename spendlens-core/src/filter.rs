//! Record filtering for the working set.
//!
//! Each dimension is optional. An empty category or mode set means "no
//! constraint", matching the checkbox panel where nothing ticked shows all.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::expense::ExpenseRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Inclusive lower bound; only used together with `end`
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound; only used together with `start`
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub modes: BTreeSet<String>,
}

impl Filters {
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Select the category if unselected, otherwise unselect it.
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    /// Select the mode if unselected, otherwise unselect it.
    pub fn toggle_mode(&mut self, mode: &str) {
        toggle(&mut self.modes, mode);
    }

    /// True when no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.date_range().is_none() && self.categories.is_empty() && self.modes.is_empty()
    }

    /// Exactly one date bound is set, so the range is not applied.
    pub fn has_partial_range(&self) -> bool {
        self.start.is_some() != self.end.is_some()
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Whether a single record passes every active dimension.
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some((start, end)) = self.date_range() {
            if record.date < start || record.date > end {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }
        if !self.modes.is_empty() && !self.modes.contains(&record.payment_mode) {
            return false;
        }
        true
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Records passing all filters, in input order.
pub fn apply_filters(records: &[ExpenseRecord], filters: &Filters) -> Vec<ExpenseRecord> {
    records.iter().filter(|r| filters.matches(r)).cloned().collect()
}

/// Distinct values the filter panel can offer, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub modes: Vec<String>,
    pub months: Vec<String>,
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn from_records(records: &[ExpenseRecord]) -> Self {
        let mut out = Self::default();
        for r in records {
            push_unique(&mut out.categories, &r.category);
            push_unique(&mut out.modes, &r.payment_mode);
            push_unique(&mut out.months, &r.month);
            if !out.years.contains(&r.year) {
                out.years.push(r.year);
            }
        }
        out
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
