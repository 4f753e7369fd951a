//! Rupee amount parsing and display formatting.

use regex::Regex;
use std::sync::LazyLock;

pub const CURRENCY_SYMBOL: &str = "₹";

static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₹,\s]").expect("static regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

/// Parse a currency string like "₹1,200.50" into a number.
///
/// Only the leading numeric part counts ("12abc" is 12, "1.5e3" is 1500).
/// Blank, unparseable, negative or non-finite input yields 0.
pub fn parse_amount(s: &str) -> f64 {
    let cleaned = STRIP_RE.replace_all(s, "");
    let value = NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Format an amount as whole rupees with Indian digit grouping: `₹1,23,456`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    if !rounded.is_finite() || rounded == 0.0 {
        return format!("{CURRENCY_SYMBOL}0");
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = (rounded.abs() as u64).to_string();
    format!("{sign}{CURRENCY_SYMBOL}{}", group_indian(&digits))
}

/// Insert separators: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
