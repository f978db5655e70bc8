//! `fakturo-reports`: validation, aggregation, and CSV export over a scan.
//!
//! Everything here is pure: functions take the scan slice and return values,
//! so the same corpus snapshot always produces the same report.

pub mod aggregate;
pub mod csv;
pub mod validate;

pub use aggregate::{
    AgingBucket, CurrencyTotal, CustomerTotal, DayCount, FolderStats, VatBucket, aging_buckets,
    daily_histogram, folder_stats, search, top_customers, top_invoices, totals_by_currency,
    vat_histogram,
};
pub use csv::{summary_csv, validation_csv};
pub use validate::{
    DEFAULT_TOLERANCE, DuplicateGroup, FindingCode, ValidationFinding, ValidationReport, validate,
};
