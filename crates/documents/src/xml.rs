//! Primary XML encoding: exact-order writer and tolerant summary reader.

use std::collections::BTreeSet;
use std::io::Write;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use rust_decimal::Decimal;

use fakturo_core::parse_amount;
use fakturo_model::Invoice;

use crate::DocumentError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize an invoice into the primary XML document.
///
/// Element order is part of the format contract: downstream parsers and the
/// CSV exporter rely on it. An absent due date is omitted entirely, not
/// written as an empty element.
pub fn write_invoice(invoice: &Invoice, pretty: bool) -> Result<Vec<u8>, DocumentError> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    start(&mut writer, "Invoice")?;
    text_element(&mut writer, "InvoiceNumber", &invoice.invoice_number)?;
    text_element(
        &mut writer,
        "IssueDate",
        &invoice.issue_date.format(DATE_FORMAT).to_string(),
    )?;
    if let Some(due) = invoice.due_date {
        text_element(&mut writer, "DueDate", &due.format(DATE_FORMAT).to_string())?;
    }
    text_element(&mut writer, "Currency", &invoice.currency)?;
    text_element(&mut writer, "PaymentTerms", &invoice.payment_terms)?;

    start(&mut writer, "Customer")?;
    text_element(&mut writer, "Name", &invoice.bill_to.name)?;
    text_element(&mut writer, "Email", &invoice.bill_to.email)?;
    start(&mut writer, "Address")?;
    text_element(&mut writer, "Street", &invoice.bill_to.address.street)?;
    text_element(&mut writer, "ZipCode", &invoice.bill_to.address.zip_code)?;
    text_element(&mut writer, "City", &invoice.bill_to.address.city)?;
    text_element(&mut writer, "Country", &invoice.bill_to.address.country)?;
    end(&mut writer, "Address")?;
    end(&mut writer, "Customer")?;

    start(&mut writer, "Financials")?;
    text_element(&mut writer, "Subtotal", &invoice.subtotal.to_string())?;
    text_element(&mut writer, "StandardTaxRate", &invoice.tax_rate.to_string())?;
    text_element(&mut writer, "TaxAmount", &invoice.tax_amount.to_string())?;
    text_element(&mut writer, "Total", &invoice.total.to_string())?;
    text_element(&mut writer, "IBAN", &invoice.iban)?;
    text_element(&mut writer, "BIC", &invoice.bic)?;
    text_element(&mut writer, "VendorVAT", &invoice.vendor_vat_id)?;
    text_element(&mut writer, "CustomerVAT", &invoice.customer_vat_id)?;
    end(&mut writer, "Financials")?;

    start(&mut writer, "Items")?;
    for item in &invoice.items {
        start(&mut writer, "Item")?;
        text_element(&mut writer, "SKU", &item.sku)?;
        text_element(&mut writer, "Description", &item.description)?;
        text_element(&mut writer, "Quantity", &item.qty.to_string())?;
        text_element(&mut writer, "UnitPrice", &item.unit_price.to_string())?;
        text_element(&mut writer, "VATRate", &item.vat_rate.to_string())?;
        text_element(&mut writer, "LineTotal", &item.line_total.to_string())?;
        end(&mut writer, "Item")?;
    }
    end(&mut writer, "Items")?;

    text_element(&mut writer, "Notes", &invoice.notes)?;
    end(&mut writer, "Invoice")?;

    Ok(writer.into_inner())
}

fn start<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<(), quick_xml::Error> {
    w.write_event(Event::Start(BytesStart::new(tag)))
}

fn end<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<(), quick_xml::Error> {
    w.write_event(Event::End(BytesEnd::new(tag)))
}

fn text_element<W: Write>(w: &mut Writer<W>, tag: &str, text: &str) -> Result<(), quick_xml::Error> {
    start(w, tag)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, tag)
}

/// Denormalized projection of one persisted document.
///
/// Missing elements default to empty/zero; the VAT rate set is deduplicated
/// during the same pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSummary {
    pub invoice_number: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer: String,
    pub currency: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub item_count: usize,
    /// Distinct per-line VAT rates, ascending.
    pub vat_rates: Vec<Decimal>,
}

/// Tolerant parse of a primary document.
///
/// Returns `None` only for documents that are not well-formed XML at all;
/// well-formed documents with missing or unexpected elements yield a summary
/// with defaulted fields. A `DueDate` element that is absent or empty both
/// mean "no due date".
pub fn parse_summary(bytes: &[u8]) -> Option<DocumentSummary> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut summary = DocumentSummary::default();
    let mut vat_rates = BTreeSet::new();
    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if stack.len() == 2 && stack[1] == "Items" && name == "Item" {
                    summary.item_count += 1;
                }
                stack.push(name);
                saw_root = true;
                text.clear();
            }
            Ok(Event::Text(e)) => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::End(_)) => {
                apply_field(&mut summary, &mut vat_rates, &stack, text.trim());
                stack.pop();
                text.clear();
            }
            Ok(Event::Empty(_)) => text.clear(),
            Ok(Event::Eof) => {
                // Elements still open at end of input: truncated file.
                if !stack.is_empty() {
                    return None;
                }
                break;
            }
            Ok(_) => {}
            // Not well-formed: skip the whole file.
            Err(_) => return None,
        }
        buf.clear();
    }

    if !saw_root {
        return None;
    }
    summary.vat_rates = vat_rates.into_iter().collect();
    Some(summary)
}

fn apply_field(
    summary: &mut DocumentSummary,
    vat_rates: &mut BTreeSet<Decimal>,
    stack: &[String],
    value: &str,
) {
    match stack.len() {
        // Direct children of the root element.
        2 => match stack[1].as_str() {
            "InvoiceNumber" => summary.invoice_number = value.to_string(),
            "IssueDate" => summary.issue_date = parse_date(value),
            "DueDate" => summary.due_date = parse_date(value),
            "Currency" => summary.currency = value.to_string(),
            _ => {}
        },
        3 if stack[1] == "Customer" && stack[2] == "Name" => {
            summary.customer = value.to_string();
        }
        3 if stack[1] == "Financials" => match stack[2].as_str() {
            "Subtotal" => summary.subtotal = parse_amount(value),
            "TaxAmount" => summary.tax = parse_amount(value),
            "Total" => summary.total = parse_amount(value),
            _ => {}
        },
        4 if stack[1] == "Items" && stack[2] == "Item" && stack[3] == "VATRate" => {
            vat_rates.insert(parse_amount(value));
        }
        _ => {}
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
