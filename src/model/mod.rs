//! Data model for slip note conversion.
//!
//! This module defines the intermediate representation that bridges
//! DOCX reading and debit note rendering: the raw block structure of
//! the uploaded slip note, and the normalized contract-field record
//! extracted from it.

mod document;
mod fields;

pub use document::{Block, RawDocument, Table, TableRow};
pub use fields::{
    Address, ContractFields, FieldValue, Money, Percent, DEFAULT_CURRENCY, DEFAULT_PAYMENT_DAYS,
    PLACEHOLDER,
};
