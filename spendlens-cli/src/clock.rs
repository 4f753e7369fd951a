//! Wall-clock helpers. "Today" depends on the configured timezone.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Current calendar date in an IANA zone like "Asia/Kolkata".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_in_valid_zone() {
        let utc_today = Utc::now().date_naive();
        let kolkata = today_in("Asia/Kolkata").unwrap();
        let diff = (kolkata - utc_today).num_days();
        assert!((0..=1).contains(&diff), "diff was {diff}");
    }

    #[test]
    fn test_today_in_rejects_unknown_zone() {
        let err = today_in("Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }
}
