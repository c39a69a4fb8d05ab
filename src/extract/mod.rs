//! Field extraction: turn a [`RawDocument`] into a [`ContractFields`]
//! record.
//!
//! Slip notes are authored by humans, so every field is resolved
//! through an ordered list of strategies (table-cell lookup, inline
//! label lookup, then positional capture) against a declared table of
//! accepted label spellings. Extraction is best-effort by contract:
//! a field no strategy matches becomes an explicit placeholder, and the
//! only failure is a document with nothing to scan at all.

mod labels;
mod money;
mod period;

pub use labels::{labels_for, FieldKey, FieldSpec, FIELD_TABLE};
pub use money::{format_amount, parse_money, parse_percent};
pub use period::{due_date, leftmost_date, payment_days};

use crate::error::{Error, Result};
use crate::model::{Address, Block, ContractFields, FieldValue, RawDocument};
use labels::{cell_matches, match_label, starts_with_known_label};
use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing signed-share figure on a reinsurer line, e.g. `100%` in
/// `XYZ Re 100%`.
static SHARE_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\d{1,3}(?:[.,]\d+)?\s*%").unwrap());

/// Extract the contract-field record from a slip note.
///
/// # Errors
///
/// Returns [`Error::ExtractionFailed`] only when the document contains
/// no blocks; partial extraction is success.
pub fn extract(doc: &RawDocument) -> Result<ContractFields> {
    if doc.is_empty() {
        return Err(Error::ExtractionFailed);
    }
    let lines = doc.lines();

    let mut fields = ContractFields::new();
    fields.slip_no = lookup(doc, &lines, FieldKey::SlipNo);
    fields.cover_type = lookup(doc, &lines, FieldKey::CoverType);
    fields.insured = lookup(doc, &lines, FieldKey::Insured);
    fields.reinsured = lookup(doc, &lines, FieldKey::Reinsured);
    fields.period = lookup(doc, &lines, FieldKey::Period);
    fields.payment_terms = lookup(doc, &lines, FieldKey::PaymentTerms);

    let premium_raw = lookup(doc, &lines, FieldKey::Premium);
    fields.premium = parse_money(premium_raw.as_option().unwrap_or(""));

    let brokerage_raw = lookup(doc, &lines, FieldKey::Brokerage);
    fields.brokerage = parse_percent(brokerage_raw.as_option().unwrap_or(""));

    fields.reinsurer = lookup_reinsurer(&lines);
    fields.reinsured_address = lookup_address(&lines);

    fields.payment_days = payment_days(fields.payment_terms.as_option());
    let inception = fields.period.as_option().and_then(leftmost_date);
    fields.due_date = due_date(inception, fields.payment_days);

    let missing = fields.missing_count();
    if missing > 0 {
        log::warn!("extraction completed with {missing} field(s) at placeholder");
    } else {
        log::debug!("extraction completed with all fields recovered");
    }
    Ok(fields)
}

/// Resolve one field through the ordered strategies. Label spellings
/// are tried in declaration order; the first strategy producing a
/// non-empty value wins.
fn lookup(doc: &RawDocument, lines: &[String], key: FieldKey) -> FieldValue {
    for label in labels_for(key) {
        if let Some(value) = table_cell_lookup(doc, label) {
            log::debug!("{}: table-cell match on {label:?}", key.as_str());
            return FieldValue::found(value);
        }
    }
    for label in labels_for(key) {
        if let Some(value) = inline_lookup(lines, label) {
            log::debug!("{}: inline match on {label:?}", key.as_str());
            return FieldValue::found(value);
        }
    }
    log::debug!("{}: no strategy matched", key.as_str());
    FieldValue::Missing
}

/// Strategy (a): a table row whose first non-empty cell is the label;
/// the following cells joined are the value.
fn table_cell_lookup(doc: &RawDocument, label: &str) -> Option<String> {
    for block in &doc.blocks {
        let Block::Table(table) = block else { continue };
        for row in &table.rows {
            let Some(first) = row.cells.iter().position(|c| !c.trim().is_empty()) else {
                continue;
            };
            if !cell_matches(&row.cells[first], label) {
                continue;
            }
            let value = row.cells[first + 1..]
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Strategy (b): a line opening with the label and a separator; the
/// remainder of the line is the value.
fn inline_lookup(lines: &[String], label: &str) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| match_label(line, label))
        .find(|value| !value.is_empty())
}

/// Reinsurer resolution: inline value when present, otherwise the first
/// non-blank line after a bare `SIGNED LINE` heading; in both cases the
/// signed-share percentage and anything after it is stripped.
fn lookup_reinsurer(lines: &[String]) -> FieldValue {
    for label in labels_for(FieldKey::Reinsurer) {
        for (i, line) in lines.iter().enumerate() {
            let Some(value) = match_label(line, label) else {
                continue;
            };
            let candidate = if value.is_empty() {
                next_content_line(lines, i + 1)
            } else {
                Some(value)
            };
            if let Some(name) = candidate.map(|v| strip_share(&v)).filter(|n| !n.is_empty()) {
                log::debug!("reinsurer: match on {label:?}");
                return FieldValue::found(name);
            }
        }
    }
    FieldValue::Missing
}

fn next_content_line(lines: &[String], from: usize) -> Option<String> {
    lines[from..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .filter(|l| !starts_with_known_label(l))
        .map(str::to_string)
}

fn strip_share(value: &str) -> String {
    match SHARE_TAIL_RE.find(value) {
        Some(m) => value[..m.start()].trim().to_string(),
        None => value.trim().to_string(),
    }
}

/// Strategy (c): positional capture of the reinsured address, the text
/// after the label, through following lines, until a blank line or the
/// next recognized label; then split into two display lines.
fn lookup_address(lines: &[String]) -> Address {
    for label in labels_for(FieldKey::ReinsuredAddress) {
        for (i, line) in lines.iter().enumerate() {
            let Some(rest) = match_label(line, label) else {
                continue;
            };
            let mut pieces: Vec<String> = Vec::new();
            if !rest.is_empty() {
                pieces.push(rest);
            }
            for follow in &lines[i + 1..] {
                let follow = follow.trim();
                if follow.is_empty() || starts_with_known_label(follow) {
                    break;
                }
                pieces.push(follow.to_string());
            }
            if pieces.is_empty() {
                continue;
            }
            log::debug!("reinsured_address: block capture on {label:?}");
            return split_address(pieces);
        }
    }
    Address::default()
}

/// Two display lines from the captured block. A multi-line capture maps
/// directly; a single line is split before its first 'N' (the sampled
/// slips start the city line with a district name) or at the midpoint.
fn split_address(pieces: Vec<String>) -> Address {
    if pieces.len() >= 2 {
        return Address {
            line1: FieldValue::found(pieces[0].clone()),
            line2: FieldValue::found(pieces[1..].join(" ")),
        };
    }

    let text = pieces.into_iter().next().unwrap_or_default();
    let split_at = text
        .find('N')
        .filter(|&idx| idx > 0)
        .or_else(|| midpoint_boundary(&text));

    match split_at {
        Some(idx) => {
            let (first, second) = text.split_at(idx);
            Address {
                line1: FieldValue::found(first.trim_end()),
                line2: FieldValue::from(Some(second.trim_start().to_string())),
            }
        }
        None => Address {
            line1: FieldValue::from(Some(text)),
            line2: FieldValue::Missing,
        },
    }
}

fn midpoint_boundary(text: &str) -> Option<usize> {
    let count = text.chars().count();
    if count < 2 {
        return None;
    }
    text.char_indices().nth(count / 2).map(|(idx, _)| idx)
}
