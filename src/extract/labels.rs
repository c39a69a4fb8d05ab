//! Label table: the accepted spellings for each contract field.
//!
//! This is configuration data, not logic. Matching is case-insensitive,
//! tolerant of trailing punctuation and collapsed whitespace, and
//! first-match-wins in declaration order so behavior stays
//! deterministic when a document happens to satisfy several spellings.

/// Semantic keys of the closed contract-field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    /// Unique market reference
    SlipNo,
    /// Type of cover
    CoverType,
    /// Insured party
    Insured,
    /// Reinsured party
    Reinsured,
    /// Period of insurance
    Period,
    /// Payment terms
    PaymentTerms,
    /// Gross premium
    Premium,
    /// Total brokerage
    Brokerage,
    /// Reinsurer (signed line)
    Reinsurer,
    /// Address of the reinsured
    ReinsuredAddress,
}

impl FieldKey {
    /// Stable name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::SlipNo => "slip_no",
            FieldKey::CoverType => "cover_type",
            FieldKey::Insured => "insured",
            FieldKey::Reinsured => "reinsured",
            FieldKey::Period => "period",
            FieldKey::PaymentTerms => "payment_terms",
            FieldKey::Premium => "premium",
            FieldKey::Brokerage => "brokerage",
            FieldKey::Reinsurer => "reinsurer",
            FieldKey::ReinsuredAddress => "reinsured_address",
        }
    }
}

/// Accepted label spellings for one field. Longer spellings come first
/// so a shorter spelling never swallows the head of a longer one.
#[derive(Debug)]
pub struct FieldSpec {
    /// Field the spellings resolve to
    pub key: FieldKey,
    /// Accepted spellings, normalized comparison
    pub labels: &'static [&'static str],
}

/// The declared extraction table, evaluated top-to-bottom.
///
/// Spellings were enumerated from representative slip notes; extend the
/// lists here rather than touching the pipeline. `ADDITINONAL INSURED`
/// is a misspelling that really occurs in authored documents.
pub const FIELD_TABLE: &[FieldSpec] = &[
    FieldSpec {
        key: FieldKey::SlipNo,
        labels: &["UNIQUE MARKET REFERENCE", "MARKET REFERENCE", "SLIP REFERENCE", "UMR"],
    },
    FieldSpec {
        key: FieldKey::CoverType,
        labels: &["TYPE OF COVER", "TYPE"],
    },
    FieldSpec {
        key: FieldKey::Insured,
        labels: &["NAME OF INSURED", "ORIGINAL INSURED", "INSURED"],
    },
    FieldSpec {
        key: FieldKey::Reinsured,
        labels: &["NAME OF REINSURED", "REINSURED"],
    },
    FieldSpec {
        key: FieldKey::Period,
        labels: &["PERIOD OF INSURANCE", "POLICY PERIOD", "PERIOD"],
    },
    FieldSpec {
        key: FieldKey::PaymentTerms,
        labels: &["PREMIUM PAYMENT TERMS", "PAYMENT TERMS", "TERMS OF PAYMENT"],
    },
    FieldSpec {
        key: FieldKey::Premium,
        labels: &["GROSS PREMIUM", "TOTAL PREMIUM", "PREMIUM"],
    },
    FieldSpec {
        key: FieldKey::Brokerage,
        labels: &["TOTAL BROKERAGE", "BROKERAGE"],
    },
    FieldSpec {
        key: FieldKey::Reinsurer,
        labels: &["REINSURER", "SIGNED LINE", "SECURITY"],
    },
    FieldSpec {
        key: FieldKey::ReinsuredAddress,
        labels: &["ADDRESS (OF REINSURED)", "ADDRESS OF REINSURED", "ADDRESS"],
    },
];

/// Labels that terminate a positional block capture but are not
/// extracted themselves.
const TERMINATOR_LABELS: &[&str] = &["ADDITIONAL INSURED", "ADDITINONAL INSURED", "SIGNED LINE"];

/// Look up the spellings for a field key.
pub fn labels_for(key: FieldKey) -> &'static [&'static str] {
    FIELD_TABLE
        .iter()
        .find(|spec| spec.key == key)
        .map(|spec| spec.labels)
        .unwrap_or(&[])
}

/// Collapse whitespace and uppercase for label comparison. ASCII
/// uppercasing keeps byte offsets aligned with the collapsed original.
pub fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapse_upper(s: &str) -> String {
    collapse(s).to_ascii_uppercase()
}

/// Try to match `label` at the start of `line`; on success return the
/// remainder of the line with leading separators stripped.
///
/// A match is rejected when the line itself opens with a known label
/// strictly longer than the matched one, which means we only matched
/// its head (e.g. `PREMIUM` against `PREMIUM PAYMENT TERMS`). The value
/// text is free to open with a label word, as in
/// `INSURED: Security Insurance Ltd`.
pub fn match_label(line: &str, label: &str) -> Option<String> {
    let collapsed = collapse(line);
    let upper = collapsed.to_ascii_uppercase();
    let label_norm = collapse_upper(label);

    if !prefixes_with_boundary(&upper, &label_norm) {
        return None;
    }
    if opens_with_longer_label(&upper, label_norm.len()) {
        return None;
    }

    let value = collapsed[label_norm.len()..]
        .trim_start_matches([':', '.', '-', ' ', '\t'])
        .trim()
        .to_string();
    Some(value)
}

/// Whether `upper` opens with `label_norm` followed by a separator or
/// the end of the line.
fn prefixes_with_boundary(upper: &str, label_norm: &str) -> bool {
    upper.starts_with(label_norm)
        && matches!(
            upper[label_norm.len()..].chars().next(),
            None | Some(':') | Some('.') | Some('-') | Some(' ')
        )
}

fn opens_with_longer_label(upper: &str, matched_len: usize) -> bool {
    FIELD_TABLE
        .iter()
        .flat_map(|spec| spec.labels.iter())
        .chain(TERMINATOR_LABELS.iter())
        .any(|label| {
            let label_norm = collapse_upper(label);
            label_norm.len() > matched_len && prefixes_with_boundary(upper, &label_norm)
        })
}

/// Whether a table cell is exactly one of the accepted spellings,
/// trailing punctuation ignored.
pub fn cell_matches(cell: &str, label: &str) -> bool {
    let cell_norm = collapse_upper(cell);
    let cell_norm = cell_norm.trim_end_matches([':', '.', '-', ' ']);
    cell_norm == collapse_upper(label)
}

/// Whether a line opens with any label the table knows about. Used to
/// terminate positional block captures.
pub fn starts_with_known_label(line: &str) -> bool {
    let upper = collapse_upper(line);
    FIELD_TABLE
        .iter()
        .flat_map(|spec| spec.labels.iter())
        .chain(TERMINATOR_LABELS.iter())
        .any(|label| prefixes_with_boundary(&upper, &collapse_upper(label)))
}
