//! DOCX generation for debit notes.
//!
//! Rendering is pure substitution: every binding resolves against the
//! extracted record, and a missing value becomes the visible
//! placeholder. Any correction of field content belongs in extraction,
//! never here.

use chrono::NaiveDate;
use docx_rs::{AlignmentType, Docx, Paragraph, Run, Table, TableCell, TableRow, WidthType};
use std::io::Cursor;

use super::schema::{schema_for, settlement_iban, Binding, Recipient, Variant};
use super::RenderedDocument;
use crate::error::{Error, Result};
use crate::extract::format_amount;
use crate::model::{ContractFields, PLACEHOLDER};
use crate::refs::ReferenceId;

/// Everything one render call substitutes from.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Extracted contract fields
    pub fields: &'a ContractFields,
    /// This variant's reference identifier
    pub reference: &'a ReferenceId,
    /// Issue date printed on the note
    pub issue_date: NaiveDate,
}

/// Render one debit note variant.
pub fn render(ctx: &RenderContext<'_>, variant: Variant) -> Result<RenderedDocument> {
    let schema = schema_for(variant);
    schema.validate()?;

    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(schema.title).bold().size(32)),
        )
        .add_paragraph(Paragraph::new());

    for line in recipient_lines(schema.recipient, ctx.fields) {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }
    docx = docx.add_paragraph(Paragraph::new());

    let rows: Vec<TableRow> = schema
        .rows
        .iter()
        .map(|row| {
            TableRow::new(vec![
                label_cell(row.label),
                value_cell(&resolve(row.binding, ctx)),
            ])
        })
        .collect();
    docx = docx.add_table(Table::new(rows).width(9000, WidthType::Dxa));

    if schema.settlement_footer {
        let iban = settlement_iban(&ctx.fields.premium.currency).unwrap_or(PLACEHOLDER);
        docx = docx
            .add_paragraph(Paragraph::new())
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(format!(
                "Please remit the amount due in {} to the account below by the payment due date.",
                ctx.fields.premium.currency
            ))))
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(format!("IBAN: {iban}")).bold()),
            );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| Error::RenderFailed(e.to_string()))?;

    log::debug!(
        "rendered variant {} as {} ({} bytes)",
        variant.tag(),
        ctx.reference,
        buf.get_ref().len()
    );
    Ok(RenderedDocument {
        variant,
        name: ctx.reference.as_str().to_string(),
        bytes: buf.into_inner(),
    })
}

/// Resolve one binding to its display text.
fn resolve(binding: Binding, ctx: &RenderContext<'_>) -> String {
    let fields = ctx.fields;
    match binding {
        Binding::Reference => ctx.reference.as_str().to_string(),
        Binding::IssueDate => format_date(ctx.issue_date),
        Binding::CoverType => fields.cover_type.display().to_string(),
        Binding::SlipNo => fields.slip_no.display().to_string(),
        Binding::Insured => fields.insured.display().to_string(),
        Binding::Reinsured => fields.reinsured.display().to_string(),
        Binding::Period => fields.period.display().to_string(),
        Binding::DueDate => fields
            .due_date
            .map(format_date)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        Binding::PaymentTerms => fields.payment_terms.display().to_string(),
        Binding::Currency => fields.premium.currency.clone(),
        Binding::GrossPremium => match fields.premium.amount {
            Some(amount) => format_amount(amount),
            None => fields.premium.raw.display().to_string(),
        },
        Binding::NetPremium => match fields.premium.net(fields.brokerage.rate) {
            Some(amount) => format_amount(amount),
            None => fields.premium.raw.display().to_string(),
        },
        Binding::ReinsurerName => fields.reinsurer.display().to_string(),
        Binding::SettlementIban => settlement_iban(&fields.premium.currency)
            .unwrap_or(PLACEHOLDER)
            .to_string(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Addressee block at the head of the note.
fn recipient_lines(recipient: Recipient, fields: &ContractFields) -> Vec<String> {
    match recipient {
        Recipient::Reinsured => vec![
            format!("To: {}", fields.reinsured.display()),
            fields.reinsured_address.line1.display().to_string(),
            fields.reinsured_address.line2.display().to_string(),
        ],
        Recipient::Unspecified => vec![
            format!("To: {PLACEHOLDER}"),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ],
    }
}

fn label_cell(label: &str) -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(label).bold()))
        .width(3000, WidthType::Dxa)
}

fn value_cell(value: &str) -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(value)))
        .width(6000, WidthType::Dxa)
}
