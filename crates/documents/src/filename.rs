//! Corpus filename conventions.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Primary document name: `Invoice_<number>_<issue date as YYYYMMDD>.xml`.
pub fn invoice_file_name(invoice_number: &str, issue_date: NaiveDate) -> String {
    format!(
        "Invoice_{invoice_number}_{}.xml",
        issue_date.format("%Y%m%d")
    )
}

/// Sidecar path for a primary document: same base name, `.json` extension.
pub fn sidecar_path(xml_path: &Path) -> PathBuf {
    xml_path.with_extension("json")
}

/// Whether a path names a primary document the scanner should read.
pub fn is_invoice_file(path: &Path) -> bool {
    has_invoice_stem(path) && has_extension(path, "xml")
}

/// Whether a path belongs to the corpus at all (primary or sidecar).
/// Purge deletes exactly these and leaves everything else alone.
pub fn is_corpus_file(path: &Path) -> bool {
    has_invoice_stem(path) && (has_extension(path, "xml") || has_extension(path, "json"))
}

fn has_invoice_stem(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("Invoice_"))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
