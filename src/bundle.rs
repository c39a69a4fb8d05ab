//! Bundling: package the two rendered notes into one ZIP archive.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::render::RenderedDocument;

/// The downloadable archive holding both debit notes.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// ZIP payload
    pub bytes: Vec<u8>,
    /// Entry names, variant A then variant B
    pub entries: [String; 2],
}

impl Bundle {
    /// Suggested file name for the archive, derived from the variant A
    /// reference so naming never depends on extraction content.
    pub fn file_name(&self) -> String {
        let stem = self.entries[0].trim_end_matches(".docx");
        format!("debit_notes_{stem}.zip")
    }
}

/// Package the two rendered notes.
///
/// Entry names come from the references, and entry timestamps are
/// pinned, so identical inputs produce byte-identical archives.
pub fn bundle(a: &RenderedDocument, b: &RenderedDocument) -> Result<Bundle> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for doc in [a, b] {
        writer.start_file(doc.entry_name(), options)?;
        writer.write_all(&doc.bytes)?;
    }
    let cursor = writer.finish()?;

    let bundle = Bundle {
        bytes: cursor.into_inner(),
        entries: [a.entry_name(), b.entry_name()],
    };
    log::debug!(
        "bundled {} + {} ({} bytes)",
        bundle.entries[0],
        bundle.entries[1],
        bundle.bytes.len()
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Variant;
    use std::io::Read;

    fn doc(variant: Variant, name: &str, payload: &[u8]) -> RenderedDocument {
        RenderedDocument {
            variant,
            name: name.to_string(),
            bytes: payload.to_vec(),
        }
    }

    #[test]
    fn test_bundle_entries() {
        let a = doc(Variant::Client, "DN-RHB-2025-001", b"alpha");
        let b = doc(Variant::Reinsurer, "DN-RHB-2025-002", b"beta");
        let bundle = bundle(&a, &b).unwrap();

        assert_eq!(bundle.entries[0], "DN-RHB-2025-001.docx");
        assert_eq!(bundle.entries[1], "DN-RHB-2025-002.docx");
        assert_eq!(bundle.file_name(), "debit_notes_DN-RHB-2025-001.zip");

        let mut archive = zip::ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut payload = Vec::new();
        archive
            .by_name("DN-RHB-2025-001.docx")
            .unwrap()
            .read_to_end(&mut payload)
            .unwrap();
        assert_eq!(payload, b"alpha");
    }

    #[test]
    fn test_bundle_deterministic() {
        let a = doc(Variant::Client, "DN-RHB-1", b"alpha");
        let b = doc(Variant::Reinsurer, "DN-RHB-2", b"beta");

        let first = bundle(&a, &b).unwrap();
        let second = bundle(&a, &b).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }
}
