//! Plain-text rendering of summaries for the terminal.

use spendlens_core::insights::{daily_mean, moving_average, DEFAULT_MA_WINDOW};
use spendlens_core::{
    format_currency, DashboardView, FilterOptions, MonthComparison, Page, YearSummary,
};

pub fn month_view(view: &DashboardView) -> String {
    let m = &view.month;
    let s = &view.stats;
    let mut out = String::new();

    out.push_str(&format!("# {} {} overview\n\n", m.month, m.year));
    out.push_str(&format!("Total spend:       {}\n", format_currency(s.total)));
    out.push_str(&format!(
        "Avg. daily spend:  {} (per active day)\n",
        format_currency(s.average_per_active_day)
    ));
    match &s.highest_day {
        Some(day) => out.push_str(&format!(
            "Highest day:       {} on {}\n",
            format_currency(day.total),
            day.date.format("%d %b")
        )),
        None => out.push_str("Highest day:       -\n"),
    }
    match &s.top_category {
        Some(c) => out.push_str(&format!(
            "Top category:      {} ({:.1}% of total)\n",
            c.category, c.percentage
        )),
        None => out.push_str("Top category:      None\n"),
    }

    out.push_str("\n## Spend by category\n\n");
    for c in &m.categories {
        out.push_str(&format!(
            "{:<20} {:>12} {:>6.1}%\n",
            c.category,
            format_currency(c.total),
            c.percentage
        ));
    }

    out.push_str("\n## Spend by payment mode\n\n");
    for md in &m.modes {
        out.push_str(&format!(
            "{:<20} {:>12} {:>6.1}%\n",
            md.mode,
            format_currency(md.total),
            md.percentage
        ));
    }

    out.push_str(&format!(
        "\n## Daily spend ({}-day average, month mean {}/day)\n\n",
        DEFAULT_MA_WINDOW,
        format_currency(daily_mean(&m.daily_totals))
    ));
    let ma = moving_average(&m.daily_totals, DEFAULT_MA_WINDOW);
    for (day, avg) in m.daily_totals.iter().zip(ma) {
        out.push_str(&format!(
            "{} {:>12} {:>12}\n",
            day.date.format("%d %b %a"),
            format_currency(day.total),
            format_currency(avg)
        ));
    }

    if let Some(cmp) = &view.comparison {
        out.push('\n');
        out.push_str(&comparison(cmp));
    }

    out
}

pub fn comparison(cmp: &MonthComparison) -> String {
    let mut out = format!(
        "## {} vs {}\n\n{:<20} {:>12} {:>12} {:>12} {:>8}\n",
        cmp.current_month, cmp.previous_month, "Category", "Current", "Previous", "Change", "%"
    );
    for c in &cmp.categories {
        let sign = if c.change >= 0.0 { "+" } else { "" };
        out.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>7.1}%\n",
            c.category,
            format_currency(c.current),
            format_currency(c.previous),
            format!("{sign}{}", format_currency(c.change)),
            c.percent_change
        ));
    }
    out
}

pub fn year(summary: &YearSummary) -> String {
    let mut out = format!(
        "# {} trends\n\nTotal spend: {}\n\n",
        summary.year,
        format_currency(summary.total)
    );
    for m in &summary.monthly_totals {
        let top = m
            .categories
            .first()
            .map(|c| c.category.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "{:<12} {:>12}  top: {}\n",
            m.month,
            format_currency(m.total),
            top
        ));
    }
    out
}

pub fn page(page: &Page) -> String {
    let mut out = format!(
        "{:<12} {:<16} {:>10} {:<10} {}\n",
        "Date", "Category", "Amount", "Mode", "Paid To"
    );
    for r in &page.items {
        out.push_str(&format!(
            "{:<12} {:<16} {:>10} {:<10} {}\n",
            r.date.format("%d %b %Y"),
            r.category,
            format_currency(r.amount),
            r.payment_mode,
            r.payee
        ));
    }
    out.push_str(&format!(
        "\nPage {} of {} ({} expenses)\n",
        page.page, page.total_pages, page.total_items
    ));
    out
}

pub fn options(opts: &FilterOptions) -> String {
    let years: Vec<String> = opts.years.iter().map(|y| y.to_string()).collect();
    format!(
        "Categories: {}\nModes:      {}\nMonths:     {}\nYears:      {}\n",
        opts.categories.join(", "),
        opts.modes.join(", "),
        opts.months.join(", "),
        years.join(", ")
    )
}
