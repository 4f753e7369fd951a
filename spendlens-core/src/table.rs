//! Search, sort and paging for the expense listing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::expense::ExpenseRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    Date,
    Amount,
    Category,
    Mode,
    Payee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Case-insensitive substring search over category, mode, payee and notes.
pub fn search(records: &[ExpenseRecord], term: &str) -> Vec<ExpenseRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| {
            [&r.category, &r.payment_mode, &r.payee, &r.notes]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Stable sort by one column.
pub fn sort_records(records: &mut [ExpenseRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &ExpenseRecord, b: &ExpenseRecord, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Mode => a.payment_mode.cmp(&b.payment_mode),
        SortField::Payee => a.payee.cmp(&b.payee),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based; 0 only when there are no items
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<ExpenseRecord>,
}

/// Slice out one page. `page` is clamped into range; `per_page` of 0 is treated as 1.
pub fn paginate(records: &[ExpenseRecord], page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(per_page);

    if total_pages == 0 {
        return Page {
            page: 0,
            total_pages,
            total_items,
            items: Vec::new(),
        };
    }

    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        page,
        total_pages,
        total_items,
        items: records[start..end].to_vec(),
    }
}
