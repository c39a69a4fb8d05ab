//! Normalized contract-field record.

use serde::{Deserialize, Serialize};

/// Visible placeholder rendered for any field no strategy matched.
///
/// Extraction is best-effort by contract: a missing field degrades to
/// this marker in the generated note so the broker can correct it by
/// hand instead of the whole conversion failing.
pub const PLACEHOLDER: &str = "[not found]";

/// Default payment terms, in days, when no day count is stated.
pub const DEFAULT_PAYMENT_DAYS: u32 = 120;

/// Currency assumed when the premium line names none.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// An extracted field value, or an explicit "not found" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    /// A value recovered from the slip note
    Found(String),
    /// No strategy matched; renders as [`PLACEHOLDER`]
    Missing,
}

impl FieldValue {
    /// Wrap a recovered value.
    pub fn found(value: impl Into<String>) -> Self {
        FieldValue::Found(value.into())
    }

    /// Whether the field was not recovered.
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// The value, if recovered.
    pub fn as_option(&self) -> Option<&str> {
        match self {
            FieldValue::Found(v) => Some(v),
            FieldValue::Missing => None,
        }
    }

    /// The value as rendered into a note: the text itself, or the
    /// visible placeholder.
    pub fn display(&self) -> &str {
        self.as_option().unwrap_or(PLACEHOLDER)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Missing
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => FieldValue::Found(v),
            _ => FieldValue::Missing,
        }
    }
}

/// A monetary value: raw text plus normalized magnitude and currency.
///
/// When the magnitude fails numeric parsing the raw text is kept and
/// `amount` stays `None`; rendering then falls back to the literal text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    /// The text as it appeared in the slip note
    pub raw: FieldValue,
    /// Normalized magnitude, if parseable
    pub amount: Option<f64>,
    /// ISO-style currency designator (e.g., "EUR")
    pub currency: String,
}

impl Default for Money {
    fn default() -> Self {
        Self {
            raw: FieldValue::Missing,
            amount: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Money {
    /// Whether the magnitude was parsed.
    pub fn is_parsed(&self) -> bool {
        self.amount.is_some()
    }

    /// Magnitude after deducting the given rate (e.g., brokerage).
    pub fn net(&self, rate: f64) -> Option<f64> {
        self.amount.map(|a| a * (1.0 - rate))
    }
}

/// A percentage value: raw text plus parsed rate in `[0, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Percent {
    /// The text as it appeared in the slip note
    pub raw: FieldValue,
    /// Parsed rate; 0.0 when unparsed
    pub rate: f64,
}

/// A postal address split into two display lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    /// First display line
    pub line1: FieldValue,
    /// Second display line
    pub line2: FieldValue,
}

/// The closed record of contract fields both debit note variants draw
/// from. Produced once per conversion by the extractor and never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractFields {
    /// Unique market reference (slip number)
    pub slip_no: FieldValue,
    /// Type of cover
    pub cover_type: FieldValue,
    /// Insured party
    pub insured: FieldValue,
    /// Reinsured party
    pub reinsured: FieldValue,
    /// Period of insurance, as authored
    pub period: FieldValue,
    /// Payment terms, as authored
    pub payment_terms: FieldValue,
    /// Reinsurer name (from the signed line)
    pub reinsurer: FieldValue,
    /// Gross premium
    pub premium: Money,
    /// Total brokerage
    pub brokerage: Percent,
    /// Address of the reinsured
    pub reinsured_address: Address,
    /// Payment terms day count
    pub payment_days: u32,
    /// Inception date plus payment days, when the period held a date
    pub due_date: Option<chrono::NaiveDate>,
}

impl ContractFields {
    /// Create a record with every field at its "not found" sentinel.
    pub fn new() -> Self {
        Self {
            slip_no: FieldValue::Missing,
            cover_type: FieldValue::Missing,
            insured: FieldValue::Missing,
            reinsured: FieldValue::Missing,
            period: FieldValue::Missing,
            payment_terms: FieldValue::Missing,
            reinsurer: FieldValue::Missing,
            premium: Money::default(),
            brokerage: Percent::default(),
            reinsured_address: Address::default(),
            payment_days: DEFAULT_PAYMENT_DAYS,
            due_date: None,
        }
    }

    /// Count of top-level fields still at the sentinel.
    pub fn missing_count(&self) -> usize {
        [
            &self.slip_no,
            &self.cover_type,
            &self.insured,
            &self.reinsured,
            &self.period,
            &self.payment_terms,
            &self.reinsurer,
            &self.premium.raw,
            &self.brokerage.raw,
            &self.reinsured_address.line1,
        ]
        .iter()
        .filter(|f| f.is_missing())
        .count()
    }
}

impl Default for ContractFields {
    fn default() -> Self {
        Self::new()
    }
}
