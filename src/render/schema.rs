//! Template schemas for the two debit note variants.
//!
//! Each variant owns an independent, explicit ordered list of
//! label/binding rows so it stays auditable on its own. Bindings are a
//! closed enum; resolution never fails on a missing value, it renders
//! the placeholder instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Output document variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Variant A, addressed to the client (the reinsured)
    Client,
    /// Variant B, addressed to the reinsurer
    Reinsurer,
}

impl Variant {
    /// Short tag used in logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Variant::Client => "A",
            Variant::Reinsurer => "B",
        }
    }
}

/// What a schema row renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The variant's reference identifier
    Reference,
    /// Conversion issue date
    IssueDate,
    /// Type of cover
    CoverType,
    /// Unique market reference
    SlipNo,
    /// Insured party
    Insured,
    /// Reinsured party
    Reinsured,
    /// Period of insurance
    Period,
    /// Premium due date
    DueDate,
    /// Payment terms as authored
    PaymentTerms,
    /// Premium currency designator
    Currency,
    /// Gross premium amount
    GrossPremium,
    /// Premium net of brokerage
    NetPremium,
    /// Reinsurer name
    ReinsurerName,
    /// Settlement account for the premium currency
    SettlementIban,
}

/// Who the note is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The reinsured party, with its extracted address block
    Reinsured,
    /// Left open for manual completion
    Unspecified,
}

/// One label/value row in a note's detail table.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRow {
    /// Label printed in the left column
    pub label: &'static str,
    /// Value source for the right column
    pub binding: Binding,
}

/// The fixed layout definition of one variant.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSchema {
    /// Variant this schema belongs to
    pub variant: Variant,
    /// Document title line
    pub title: &'static str,
    /// Addressee of the note
    pub recipient: Recipient,
    /// Ordered detail rows
    pub rows: &'static [SchemaRow],
    /// Whether the settlement footer is printed
    pub settlement_footer: bool,
}

impl TemplateSchema {
    /// Structural sanity check: labels present and not duplicated.
    /// A violation is a programming defect, not a user error.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for row in self.rows {
            if row.label.trim().is_empty() {
                return Err(Error::RenderFailed(format!(
                    "variant {} schema has an empty label",
                    self.variant.tag()
                )));
            }
            if !seen.insert(row.label) {
                return Err(Error::RenderFailed(format!(
                    "variant {} schema repeats label {:?}",
                    self.variant.tag(),
                    row.label
                )));
            }
        }
        Ok(())
    }
}

/// Variant A: the client-facing note. Gross premium, currency and the
/// settlement account; no brokerage anywhere.
pub static CLIENT_SCHEMA: TemplateSchema = TemplateSchema {
    variant: Variant::Client,
    title: "DEBIT NOTE",
    recipient: Recipient::Reinsured,
    rows: &[
        SchemaRow { label: "Our Reference", binding: Binding::Reference },
        SchemaRow { label: "Date", binding: Binding::IssueDate },
        SchemaRow { label: "Unique Market Reference", binding: Binding::SlipNo },
        SchemaRow { label: "Type", binding: Binding::CoverType },
        SchemaRow { label: "Insured", binding: Binding::Insured },
        SchemaRow { label: "Reinsured", binding: Binding::Reinsured },
        SchemaRow { label: "Period", binding: Binding::Period },
        SchemaRow { label: "Payment Due", binding: Binding::DueDate },
        SchemaRow { label: "Currency", binding: Binding::Currency },
        SchemaRow { label: "Premium Due", binding: Binding::GrossPremium },
    ],
    settlement_footer: true,
};

/// Variant B: the reinsurer-facing note. Premium is stated net of
/// brokerage and the reinsurer is named; no settlement account.
pub static REINSURER_SCHEMA: TemplateSchema = TemplateSchema {
    variant: Variant::Reinsurer,
    title: "DEBIT NOTE",
    recipient: Recipient::Unspecified,
    rows: &[
        SchemaRow { label: "Our Reference", binding: Binding::Reference },
        SchemaRow { label: "Date", binding: Binding::IssueDate },
        SchemaRow { label: "Unique Market Reference", binding: Binding::SlipNo },
        SchemaRow { label: "Type", binding: Binding::CoverType },
        SchemaRow { label: "Insured", binding: Binding::Insured },
        SchemaRow { label: "Reinsured", binding: Binding::Reinsured },
        SchemaRow { label: "Period", binding: Binding::Period },
        SchemaRow { label: "Payment Due", binding: Binding::DueDate },
        SchemaRow { label: "Payment Terms", binding: Binding::PaymentTerms },
        SchemaRow { label: "Reinsurer", binding: Binding::ReinsurerName },
        SchemaRow { label: "Net Premium Due", binding: Binding::NetPremium },
    ],
    settlement_footer: false,
};

/// Look up the schema for a variant.
pub fn schema_for(variant: Variant) -> &'static TemplateSchema {
    match variant {
        Variant::Client => &CLIENT_SCHEMA,
        Variant::Reinsurer => &REINSURER_SCHEMA,
    }
}

/// Settlement account by premium currency. Currencies without an
/// account render the placeholder in the footer.
pub fn settlement_iban(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("TR92 0006 2000 3560 0009 0742 54"),
        "EUR" => Some("TR22 0006 2000 3560 0009 0742 53"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_validate() {
        CLIENT_SCHEMA.validate().unwrap();
        REINSURER_SCHEMA.validate().unwrap();
    }

    #[test]
    fn test_variant_field_subsets_differ() {
        let a: Vec<_> = CLIENT_SCHEMA.rows.iter().map(|r| r.binding).collect();
        let b: Vec<_> = REINSURER_SCHEMA.rows.iter().map(|r| r.binding).collect();

        assert!(a.contains(&Binding::GrossPremium));
        assert!(a.contains(&Binding::SettlementIban) || CLIENT_SCHEMA.settlement_footer);
        assert!(!a.contains(&Binding::NetPremium));

        assert!(b.contains(&Binding::NetPremium));
        assert!(b.contains(&Binding::ReinsurerName));
        assert!(!b.contains(&Binding::GrossPremium));
        assert!(!REINSURER_SCHEMA.settlement_footer);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        static BROKEN: TemplateSchema = TemplateSchema {
            variant: Variant::Client,
            title: "DEBIT NOTE",
            recipient: Recipient::Reinsured,
            rows: &[
                SchemaRow { label: "Date", binding: Binding::IssueDate },
                SchemaRow { label: "Date", binding: Binding::DueDate },
            ],
            settlement_footer: false,
        };
        assert!(matches!(BROKEN.validate(), Err(Error::RenderFailed(_))));
    }

    #[test]
    fn test_settlement_iban() {
        assert!(settlement_iban("EUR").is_some());
        assert!(settlement_iban("USD").is_some());
        assert!(settlement_iban("GBP").is_none());
    }
}
