//! Monetary and percentage normalization.

use crate::model::{FieldValue, Money, Percent, DEFAULT_CURRENCY};
use once_cell::sync::Lazy;
use regex::Regex;

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\b[A-Z]{3}\b|€|\$|£|\bTL\b)").unwrap());
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d.,]*").unwrap());
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,3}(?:[.,]\d+)?)\s*%").unwrap());

/// Parse a raw premium line into a [`Money`] value.
///
/// The magnitude keeps both the raw text and, when parseable, a
/// normalized amount; currency falls back to [`DEFAULT_CURRENCY`].
pub fn parse_money(raw: &str) -> Money {
    let raw = raw.trim();
    if raw.is_empty() {
        return Money {
            raw: FieldValue::Missing,
            amount: None,
            currency: DEFAULT_CURRENCY.to_string(),
        };
    }

    let currency = CURRENCY_RE
        .find(raw)
        .map(|m| canonical_currency(m.as_str()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let amount = AMOUNT_RE
        .find(raw)
        .and_then(|m| normalize_amount(m.as_str()));
    if amount.is_none() {
        log::warn!("premium magnitude not parseable, keeping raw text: {raw:?}");
    }

    Money {
        raw: FieldValue::found(raw),
        amount,
        currency,
    }
}

/// Parse a brokerage line into a [`Percent`] value. An unparsed rate is
/// 0.0 so net-premium arithmetic degrades to the gross amount.
pub fn parse_percent(raw: &str) -> Percent {
    let raw = raw.trim();
    if raw.is_empty() {
        return Percent::default();
    }
    let rate = PERCENT_RE
        .captures(raw)
        .and_then(|c| c[1].replace(',', ".").parse::<f64>().ok())
        .map(|p| p / 100.0)
        .unwrap_or(0.0);
    Percent {
        raw: FieldValue::found(raw),
        rate,
    }
}

fn canonical_currency(token: &str) -> String {
    match token {
        "€" => "EUR".to_string(),
        "$" => "USD".to_string(),
        "£" => "GBP".to_string(),
        "TL" => "TRY".to_string(),
        code => code.to_string(),
    }
}

/// Normalize a digit group with mixed separators to a float.
///
/// When both separators occur the rightmost one is the decimal mark;
/// a lone separator followed by more than two digits is read as a
/// thousands separator (EU-authored slips write `50.000,00`).
fn normalize_amount(digits: &str) -> Option<f64> {
    let dot = digits.rfind('.');
    let comma = digits.rfind(',');

    let normalized = match (dot, comma) {
        (Some(d), Some(c)) => {
            let (dec, thou) = if d > c { ('.', ',') } else { (',', '.') };
            let cleaned: String = digits.chars().filter(|ch| *ch != thou).collect();
            cleaned.replace(dec, ".")
        }
        (Some(idx), None) | (None, Some(idx)) => {
            let tail = digits.len() - idx - 1;
            if tail <= 2 {
                digits.replace(',', ".")
            } else {
                digits.chars().filter(|ch| ch.is_ascii_digit()).collect()
            }
        }
        (None, None) => digits.to_string(),
    };

    normalized.parse::<f64>().ok()
}

/// Format an amount the way the generated notes show it: `12.345,67`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}{grouped},{frac:02}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_eu_style() {
        let money = parse_money("EUR 50.000,00");
        assert_eq!(money.currency, "EUR");
        assert_eq!(money.amount, Some(50_000.0));
    }

    #[test]
    fn test_parse_money_us_style() {
        let money = parse_money("$ 1,234,567.89");
        assert_eq!(money.currency, "USD");
        assert_eq!(money.amount, Some(1_234_567.89));
    }

    #[test]
    fn test_parse_money_symbols() {
        assert_eq!(parse_money("€ 100").currency, "EUR");
        assert_eq!(parse_money("£250,50").amount, Some(250.5));
        assert_eq!(parse_money("1.500 TL").currency, "TRY");
    }

    #[test]
    fn test_parse_money_default_currency() {
        let money = parse_money("75.000");
        assert_eq!(money.currency, "EUR");
        assert_eq!(money.amount, Some(75_000.0));
    }

    #[test]
    fn test_parse_money_unparsed_keeps_raw() {
        let money = parse_money("as agreed");
        assert_eq!(money.amount, None);
        assert_eq!(money.raw, FieldValue::found("as agreed"));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("20%").rate, 0.2);
        assert_eq!(parse_percent("12.5 %").rate, 0.125);
        assert_eq!(parse_percent("12,5%").rate, 0.125);
        assert_eq!(parse_percent("as agreed").rate, 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12_345.67), "12.345,67");
        assert_eq!(format_amount(50_000.0), "50.000,00");
        assert_eq!(format_amount(999.9), "999,90");
        assert_eq!(format_amount(0.0), "0,00");
    }
}
