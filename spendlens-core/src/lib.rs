//! spendlens-core: expense records and the aggregation pipeline behind the dashboard
//!
//! raw rows -> [`normalize`] -> [`apply_filters`] -> [`month_summary`] / [`year_summary`]

pub mod aggregate;
pub mod currency;
pub mod expense;
pub mod filter;
pub mod insights;
pub mod session;
pub mod summary;
pub mod table;

pub use aggregate::{by_category, by_day, by_mode, total_amount, CategoryTotal, DailyTotal, ModeTotal};
pub use currency::{format_currency, parse_amount, CURRENCY_SYMBOL};
pub use expense::{normalize, normalize_as_of, parse_date, ExpenseRecord, RawRecord, DATE_FORMAT};
pub use filter::{apply_filters, FilterOptions, Filters};
pub use insights::{
    compare_months, daily_mean, latest_period, moving_average, CategoryChange, MonthComparison,
    MonthStats,
};
pub use session::{DashboardView, Session};
pub use summary::{month_summary, year_summary, MonthSummary, MonthlyTotal, YearSummary};
pub use table::{paginate, search, sort_records, Page, SortField, SortOrder};
