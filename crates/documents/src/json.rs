//! Optional JSON sidecar encoding.

use fakturo_model::Invoice;

use crate::DocumentError;

/// Serialize the invoice as a pretty-printed JSON sidecar.
///
/// The sidecar mirrors the XML document field for field; an absent due date
/// becomes an explicit `null` here rather than a missing key.
pub fn to_sidecar(invoice: &Invoice) -> Result<Vec<u8>, DocumentError> {
    Ok(serde_json::to_vec_pretty(invoice)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fakturo_model::{GeneratorConfig, InvoiceBuilder};

    #[test]
    fn sidecar_uses_pascal_case_keys() {
        let cfg = GeneratorConfig::default();
        let mut invoice = InvoiceBuilder::new(&cfg, 7).build();
        invoice.invoice_number = "INV-20250101-000001".to_string();

        let bytes = to_sidecar(&invoice).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["InvoiceNumber"], "INV-20250101-000001");
        assert!(value["Items"].as_array().is_some());
        assert!(value["BillTo"]["Address"]["City"].as_str().is_some());
    }

    #[test]
    fn absent_due_date_serializes_as_null() {
        let cfg = GeneratorConfig::default();
        let mut invoice = InvoiceBuilder::new(&cfg, 7).build();
        invoice.due_date = None;

        let bytes = to_sidecar(&invoice).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["DueDate"].is_null());
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let cfg = GeneratorConfig::default();
        let mut invoice = InvoiceBuilder::new(&cfg, 7).build();
        invoice.issue_date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        let bytes = to_sidecar(&invoice).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["IssueDate"], "2025-03-09");
    }
}
