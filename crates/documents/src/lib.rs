//! `fakturo-documents`: the persisted invoice encodings.
//!
//! One invoice persists as a primary XML document and, on request, a JSON
//! sidecar sharing the base filename. This crate owns both encodings plus the
//! tolerant summary parser the scanner runs over the corpus.

pub mod filename;
pub mod json;
pub mod xml;

use thiserror::Error;

/// Serialization failure for a single document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub use xml::{DocumentSummary, parse_summary, write_invoice};
