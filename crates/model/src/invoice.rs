//! Invoice entity and its owned value objects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully populated invoice.
///
/// Owned exclusively by the generation unit that built it; serialized once
/// and then dropped, never retained or cached. Serde field names follow the
/// persisted document vocabulary (used verbatim by the JSON sidecar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub bill_to: Customer,
    pub currency: String,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    /// Standard VAT rate carried for display; per-line rates drive `tax_amount`.
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub payment_terms: String,
    pub iban: String,
    pub bic: String,
    pub vendor_vat_id: String,
    pub customer_vat_id: String,
    pub notes: String,
}

/// Billed party. Value object owned by exactly one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub address: Address,
}

/// Postal address. Value object owned by its customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

/// One position of an invoice.
///
/// Member of the invoice's ordered item list; the order is insertion order
/// and carries no meaning beyond display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    pub sku: String,
    pub description: String,
    pub qty: u32,
    pub unit_price: Decimal,
    pub vat_rate: Decimal,
    pub line_total: Decimal,
}
