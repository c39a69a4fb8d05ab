//! End-to-end conversion tests: build a slip note in memory, run the
//! full pipeline, then unzip and re-read the generated notes.

use std::io::{Cursor, Read};

use chrono::NaiveDate;
use docx_rs::{Docx, Paragraph, Run};
use slipnote::{reader, ConversionService, Error, Variant, PLACEHOLDER};

/// Build a DOCX from paragraph lines and an optional label/value table.
fn build_docx(paragraphs: &[&str], table_rows: &[[&str; 2]]) -> Vec<u8> {
    let mut docx = Docx::new();
    for line in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
    }
    if !table_rows.is_empty() {
        let rows: Vec<docx_rs::TableRow> = table_rows
            .iter()
            .map(|[label, value]| {
                docx_rs::TableRow::new(vec![
                    docx_rs::TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*label))),
                    docx_rs::TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*value))),
                ])
            })
            .collect();
        docx = docx.add_table(docx_rs::Table::new(rows));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

fn sample_slip() -> Vec<u8> {
    build_docx(
        &[
            "REINSURANCE SLIP",
            "UNIQUE MARKET REFERENCE: B0999RHB2025",
            "TYPE: Facultative Reinsurance",
            "PERIOD: 01.01.2025 - 31.12.2025",
            "PAYMENT TERMS: 90 days from inception",
            "ADDRESS (of Reinsured): Main Street 5",
            "Kavacik, Istanbul",
            "",
            "SIGNED LINE",
            "Hannover Re 100%",
        ],
        &[
            ["Insured", "Acme Reinsurance Ltd"],
            ["Reinsured", "Anadolu Sigorta"],
            ["Premium", "EUR 50.000,00"],
            ["Total Brokerage", "20%"],
        ],
    )
}

fn pinned_service() -> ConversionService {
    ConversionService::new().with_issue_date(NaiveDate::from_ymd_opt(2025, 8, 23).unwrap())
}

/// Unzip the bundle and return each entry's plain text, re-read through
/// the library's own DOCX reader.
fn entry_texts(bundle_bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bundle_bytes.to_vec())).unwrap();
    let mut texts = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        let doc = reader::read_bytes(&bytes).unwrap();
        texts.push((entry.name().to_string(), doc.plain_text()));
    }
    texts
}

#[test]
fn test_full_conversion_scenario() {
    let bundle = pinned_service()
        .convert(&sample_slip(), "2025-001", "2025-002")
        .unwrap();

    assert_eq!(bundle.entries[0], "DN-RHB-2025-001.docx");
    assert_eq!(bundle.entries[1], "DN-RHB-2025-002.docx");
    assert_eq!(bundle.file_name(), "debit_notes_DN-RHB-2025-001.zip");

    let texts = entry_texts(&bundle.bytes);
    assert_eq!(texts.len(), 2);

    // Both notes carry the insured and their own reference
    for (name, text) in &texts {
        assert!(
            text.contains("Acme Reinsurance Ltd"),
            "{name} should contain the insured"
        );
        assert!(text.contains("B0999RHB2025"), "{name} should contain the UMR");
    }
    let (_, text_a) = &texts[0];
    let (_, text_b) = &texts[1];
    assert!(text_a.contains("DN-RHB-2025-001"));
    assert!(text_b.contains("DN-RHB-2025-002"));

    // Variant A: gross premium, currency, settlement account
    assert!(text_a.contains("50.000,00"));
    assert!(text_a.contains("EUR"));
    assert!(text_a.contains("TR22 0006 2000 3560 0009 0742 53"));

    // Variant B: net premium and reinsurer; brokerage stays out of A
    assert!(text_b.contains("40.000,00"));
    assert!(text_b.contains("Hannover Re"));
    assert!(!text_a.contains("40.000,00"));

    // Due date: inception 01.01.2025 plus 90 days
    assert!(text_a.contains("01.04.2025"));
}

#[test]
fn test_missing_fields_render_placeholders() {
    let slip = build_docx(&["A slip note with no recognizable labels at all"], &[]);
    let bundle = pinned_service().convert(&slip, "2025-001", "2025-002").unwrap();

    for (name, text) in entry_texts(&bundle.bytes) {
        assert!(
            text.contains(PLACEHOLDER),
            "{name} should show the placeholder for missing fields"
        );
    }
}

#[test]
fn test_conversion_is_idempotent() {
    let slip = sample_slip();
    let service = pinned_service();

    let first = service.convert(&slip, "2025-001", "2025-002").unwrap();
    let second = service.convert(&slip, "2025-001", "2025-002").unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_label_case_and_punctuation_insensitive() {
    let lower = build_docx(&["insured: Acme Ltd"], &[]);
    let shouty = build_docx(&["INSURED :  Acme Ltd"], &[]);

    let a = slipnote::extract_fields(&lower).unwrap();
    let b = slipnote::extract_fields(&shouty).unwrap();
    assert_eq!(a.insured, b.insured);
    assert_eq!(a.insured.as_option(), Some("Acme Ltd"));
}

#[test]
fn test_empty_suffix_yields_no_bundle() {
    let result = pinned_service().convert(&sample_slip(), "", "2025-002");
    assert!(matches!(result, Err(Error::InvalidSuffix(_))));

    let result = pinned_service().convert(&sample_slip(), "2025-001", "");
    assert!(matches!(result, Err(Error::InvalidSuffix(_))));
}

#[test]
fn test_equal_suffixes_rejected() {
    // Equal suffixes would give both archive entries the same name
    let result = pinned_service().convert(&sample_slip(), "2025-001", "2025-001");
    assert!(matches!(result, Err(Error::InvalidSuffix(_))));
}

#[test]
fn test_non_docx_input_is_unreadable() {
    let result = pinned_service().convert(b"just plain text", "2025-001", "2025-002");
    assert!(matches!(result, Err(Error::UnreadableDocument(_))));
}

#[test]
fn test_custom_prefix() {
    let bundle = pinned_service()
        .with_prefix("DN-ACME")
        .convert(&sample_slip(), "1", "2")
        .unwrap();
    assert_eq!(bundle.entries[0], "DN-ACME-1.docx");
    assert_eq!(bundle.entries[1], "DN-ACME-2.docx");
}

#[test]
fn test_rendered_documents_tagged_with_variant() {
    let slip = sample_slip();
    let fields = slipnote::extract_fields(&slip).unwrap();
    let reference = slipnote::refs::compose(slipnote::DEFAULT_PREFIX, "2025-001").unwrap();
    let ctx = slipnote::render::RenderContext {
        fields: &fields,
        reference: &reference,
        issue_date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
    };
    let note = slipnote::render::render(&ctx, Variant::Reinsurer).unwrap();
    assert_eq!(note.variant, Variant::Reinsurer);
    assert_eq!(note.entry_name(), "DN-RHB-2025-001.docx");
}
