//! CSV export of the scan summary and the validation report.

use fakturo_scanner::InvoiceScan;

use crate::validate::ValidationReport;

const SUMMARY_HEADER: &str =
    "InvoiceNumber,IssueDate,DueDate,Customer,Subtotal,TaxAmount,Total,Currency";
const VALIDATION_HEADER: &str = "Type,Invoice,Message,Path";

/// One row per scanned invoice, sorted lexicographically by the full row
/// text. A missing due date is an empty field.
pub fn summary_csv(scans: &[InvoiceScan]) -> String {
    let mut rows: Vec<String> = scans
        .iter()
        .map(|scan| {
            let due = scan
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_default();
            row(&[
                &scan.invoice_number,
                &scan.issue_date.to_string(),
                &due,
                &scan.customer,
                &scan.subtotal.to_string(),
                &scan.tax.to_string(),
                &scan.total.to_string(),
                &scan.currency,
            ])
        })
        .collect();
    rows.sort_unstable();

    let mut out = String::from(SUMMARY_HEADER);
    out.push('\n');
    for r in rows {
        out.push_str(&r);
        out.push('\n');
    }
    out
}

/// Duplicates first, then anomalies, mirroring the validation report order.
pub fn validation_csv(report: &ValidationReport) -> String {
    let mut out = String::from(VALIDATION_HEADER);
    out.push('\n');
    for group in &report.duplicates {
        push_row(
            &mut out,
            &[
                "Duplicate",
                &group.invoice_number,
                &format!("count={}", group.count),
                "",
            ],
        );
    }
    for finding in &report.findings {
        push_row(
            &mut out,
            &[
                "Anomaly",
                &finding.invoice_number,
                &format!("{}: {}", finding.code, finding.message),
                &finding.path.display().to_string(),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    out.push_str(&row(fields));
    out.push('\n');
}

fn row(fields: &[&str]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(field));
    }
    out
}

/// RFC 4180: quote a field only when it contains a comma, quote, or newline;
/// embedded quotes double.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
