//! Rendering module: contract fields into generated debit notes.

mod docx;
mod schema;

pub use docx::{render, RenderContext};
pub use schema::{
    schema_for, settlement_iban, Binding, Recipient, SchemaRow, TemplateSchema, Variant,
    CLIENT_SCHEMA, REINSURER_SCHEMA,
};

use serde::{Deserialize, Serialize};

/// A generated debit note, tagged with the variant it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Variant this note was rendered for
    pub variant: Variant,
    /// Entry name stem (the reference identifier)
    pub name: String,
    /// DOCX payload
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    /// Archive entry name for this note.
    pub fn entry_name(&self) -> String {
        format!("{}.docx", self.name)
    }
}
