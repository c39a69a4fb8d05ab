//! Period and payment-term parsing: inception date and due date.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::DEFAULT_PAYMENT_DAYS;

// The day group is anchored on a non-digit boundary so a four-digit
// year cannot backtrack into a day/month reading.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(\d{1,2})[./-](\d{1,2})[./-](\d{2,4})").unwrap());
static DAYS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d{1,3})\s*days").unwrap());

/// Leftmost day-first date in a period line, e.g. the inception date of
/// `01.01.2025 - 31.12.2025`.
pub fn leftmost_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Day count stated in a payment terms line (`90 days`), or the
/// conventional default when none is stated.
pub fn payment_days(terms: Option<&str>) -> u32 {
    terms
        .and_then(|t| DAYS_RE.captures(t))
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(DEFAULT_PAYMENT_DAYS)
}

/// Premium due date: inception plus the payment term.
pub fn due_date(inception: Option<NaiveDate>, days: u32) -> Option<NaiveDate> {
    inception.map(|d| d + Duration::days(i64::from(days)))
}
