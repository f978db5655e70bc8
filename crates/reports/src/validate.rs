//! Corpus validation: arithmetic anomalies and duplicate invoice numbers.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fakturo_scanner::InvoiceScan;

/// Largest |subtotal + tax - total| that still counts as consistent.
/// Covers legitimate per-line rounding drift.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.02);

/// Anomaly category. The display form is the stable code written to CSV.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FindingCode {
    /// A monetary field is negative.
    Neg,
    /// Totals do not add up within tolerance.
    Sum,
    /// Tax was charged but no per-line VAT rate was observed.
    Vat,
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FindingCode::Neg => "NEG",
            FindingCode::Sum => "SUM",
            FindingCode::Vat => "VAT",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    pub code: FindingCode,
    pub invoice_number: String,
    pub message: String,
    pub path: PathBuf,
}

/// Invoice number shared by more than one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    pub invoice_number: String,
    pub count: usize,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
    pub duplicates: Vec<DuplicateGroup>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.duplicates.is_empty()
    }
}

/// Validate a scan. Pure: scanning the same files again yields the same
/// report.
///
/// Findings keep the scan's order; duplicate groups keep first-appearance
/// order. Documents with a blank invoice number are never treated as
/// duplicates of each other.
pub fn validate(scans: &[InvoiceScan], tolerance: Decimal) -> ValidationReport {
    let mut report = ValidationReport::default();

    for scan in scans {
        if scan.subtotal < Decimal::ZERO
            || scan.tax < Decimal::ZERO
            || scan.total < Decimal::ZERO
        {
            report.findings.push(finding(
                FindingCode::Neg,
                scan,
                "negative monetary amount".to_string(),
            ));
        }

        let delta = (scan.subtotal + scan.tax - scan.total).abs();
        if delta > tolerance {
            report.findings.push(finding(
                FindingCode::Sum,
                scan,
                format!(
                    "subtotal {} + tax {} does not match total {} (delta {})",
                    scan.subtotal,
                    scan.tax,
                    scan.total,
                    delta.round_dp(2)
                ),
            ));
        }

        if scan.tax > Decimal::ZERO && scan.vat_rates.is_empty() {
            report.findings.push(finding(
                FindingCode::Vat,
                scan,
                format!("tax {} charged but no line VAT rates present", scan.tax),
            ));
        }
    }

    let mut groups: IndexMap<&str, Vec<PathBuf>> = IndexMap::new();
    for scan in scans {
        if scan.invoice_number.is_empty() {
            continue;
        }
        groups
            .entry(scan.invoice_number.as_str())
            .or_default()
            .push(scan.path.clone());
    }
    for (number, paths) in groups {
        if paths.len() > 1 {
            report.duplicates.push(DuplicateGroup {
                invoice_number: number.to_string(),
                count: paths.len(),
                paths,
            });
        }
    }

    report
}

fn finding(code: FindingCode, scan: &InvoiceScan, message: String) -> ValidationFinding {
    ValidationFinding {
        code,
        invoice_number: scan.invoice_number.clone(),
        message,
        path: scan.path.clone(),
    }
}
