//! DOCX reading: decode uploaded bytes into a [`RawDocument`].

use crate::error::{Error, Result};
use crate::model::{RawDocument, Table, TableRow};
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};
use std::path::Path;

/// Read a slip note from raw bytes.
///
/// Walks the DOCX body in source order so paragraph/table interleaving
/// survives into the [`RawDocument`]; the extractor relies on document
/// order and label/value proximity.
///
/// # Errors
///
/// Returns [`Error::UnreadableDocument`] when the bytes are empty or
/// not a valid DOCX container.
pub fn read_bytes(data: &[u8]) -> Result<RawDocument> {
    if data.is_empty() {
        return Err(Error::UnreadableDocument("empty input".to_string()));
    }

    let docx = docx_rs::read_docx(data).map_err(|e| Error::UnreadableDocument(e.to_string()))?;

    let mut doc = RawDocument::new();
    for child in docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => {
                doc.push_paragraph(paragraph_text(&p));
            }
            DocumentChild::Table(t) => {
                doc.push_table(table_content(&t));
            }
            // Bookmarks, section breaks and the like carry no field text
            _ => {}
        }
    }

    log::debug!("read slip note: {} blocks", doc.block_count());
    Ok(doc)
}

/// Read a slip note from a file path.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<RawDocument> {
    let data = std::fs::read(path)?;
    read_bytes(&data)
}

/// Extract the visible text of a paragraph, including hyperlink runs.
fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run_text(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        push_run_text(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(text: &mut String, r: &docx_rs::Run) {
    for run_child in &r.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Convert a DOCX table into the model table, cell text flattened.
fn table_content(t: &docx_rs::Table) -> Table {
    let mut table = Table::new();
    for row in &t.rows {
        let TableChild::TableRow(r) = row;
        let mut cells: Vec<String> = Vec::new();
        for cell in &r.cells {
            let TableRowChild::TableCell(c) = cell;
            let mut cell_text = String::new();
            for child in &c.children {
                if let docx_rs::TableCellContent::Paragraph(p) = child {
                    let para = paragraph_text(p);
                    if !cell_text.is_empty() && !para.is_empty() {
                        cell_text.push(' ');
                    }
                    cell_text.push_str(&para);
                }
            }
            cells.push(cell_text.trim().to_string());
        }
        table.add_row(TableRow::new(cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = read_bytes(&[]);
        assert!(matches!(result, Err(Error::UnreadableDocument(_))));
    }

    #[test]
    fn test_non_docx_input() {
        let result = read_bytes(b"just some plain text, not a zip container");
        assert!(matches!(result, Err(Error::UnreadableDocument(_))));
    }

    #[test]
    fn test_truncated_zip_magic() {
        // Starts like a ZIP but is not a complete archive
        let result = read_bytes(b"PK\x03\x04broken");
        assert!(matches!(result, Err(Error::UnreadableDocument(_))));
    }

    #[test]
    fn test_read_file() {
        use docx_rs::{Docx, Paragraph, Run};
        use std::io::Cursor;

        let mut buf = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("INSURED: Acme Ltd")))
            .build()
            .pack(&mut buf)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slip.docx");
        std::fs::write(&path, buf.get_ref()).unwrap();

        let doc = read_file(&path).unwrap();
        assert_eq!(doc.lines(), vec!["INSURED: Acme Ltd"]);

        assert!(matches!(
            read_file(dir.path().join("missing.docx")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_roundtrip_paragraphs_and_table() {
        use docx_rs::{Docx, Paragraph, Run};
        use std::io::Cursor;

        let table = docx_rs::Table::new(vec![docx_rs::TableRow::new(vec![
            docx_rs::TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Insured"))),
            docx_rs::TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Acme Ltd"))),
        ])]);
        let mut buf = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("SLIP NOTE")))
            .add_table(table)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("End of slip")))
            .build()
            .pack(&mut buf)
            .unwrap();

        let doc = read_bytes(buf.get_ref()).unwrap();
        assert_eq!(doc.block_count(), 3);
        let lines = doc.lines();
        assert_eq!(lines[0], "SLIP NOTE");
        assert_eq!(lines[1], "Insured Acme Ltd");
        assert_eq!(lines[2], "End of slip");
    }
}
