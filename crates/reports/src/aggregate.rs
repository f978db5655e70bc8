//! Aggregations over a corpus scan.
//!
//! All functions are pure folds over the scan slice. Grouping uses insertion
//! order as the tie-breaker, so equal-valued rows come out in first-seen
//! order and repeated runs print identically.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use fakturo_scanner::InvoiceScan;

/// Search results are capped at this many rows.
pub const SEARCH_LIMIT: usize = 50;

const AGING_LABELS: [&str; 5] = ["Current", "1–30", "31–60", "61–90", "90+"];

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTotal {
    pub currency: String,
    pub invoices: u64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Grand totals per currency, largest total first.
pub fn totals_by_currency(scans: &[InvoiceScan]) -> Vec<CurrencyTotal> {
    let mut by_currency: IndexMap<&str, CurrencyTotal> = IndexMap::new();
    for scan in scans {
        let entry = by_currency
            .entry(scan.currency.as_str())
            .or_insert_with(|| CurrencyTotal {
                currency: scan.currency.clone(),
                invoices: 0,
                subtotal: Decimal::ZERO,
                tax: Decimal::ZERO,
                total: Decimal::ZERO,
            });
        entry.invoices += 1;
        entry.subtotal += scan.subtotal;
        entry.tax += scan.tax;
        entry.total += scan.total;
    }
    let mut rows: Vec<CurrencyTotal> = by_currency.into_values().collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatBucket {
    pub rate: Decimal,
    /// Number of invoices using this rate on at least one line.
    pub invoices: u64,
}

/// Distribution of VAT rates across invoices, highest rate first.
///
/// An invoice counts once per distinct rate it uses, never once per line.
pub fn vat_histogram(scans: &[InvoiceScan]) -> Vec<VatBucket> {
    let mut by_rate: IndexMap<Decimal, u64> = IndexMap::new();
    for scan in scans {
        for rate in &scan.vat_rates {
            *by_rate.entry(*rate).or_default() += 1;
        }
    }
    let mut rows: Vec<VatBucket> = by_rate
        .into_iter()
        .map(|(rate, invoices)| VatBucket { rate, invoices })
        .collect();
    rows.sort_by(|a, b| b.rate.cmp(&a.rate));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub invoices: u64,
}

/// Issue-date histogram for the 30 days ending at `today`, oldest first.
/// Days with no invoices are present with a zero count.
pub fn daily_histogram(scans: &[InvoiceScan], today: NaiveDate) -> Vec<DayCount> {
    let start = today - Duration::days(29);
    let mut rows: Vec<DayCount> = (0..30i64)
        .map(|i| DayCount {
            date: start + Duration::days(i),
            invoices: 0,
        })
        .collect();
    for scan in scans {
        if scan.issue_date >= start && scan.issue_date <= today {
            let idx = (scan.issue_date - start).num_days() as usize;
            rows[idx].invoices += 1;
        }
    }
    rows
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerTotal {
    pub customer: String,
    pub invoices: u64,
    pub total: Decimal,
}

/// The `n` customers with the highest invoiced total. Ties keep first-seen
/// order, so the ranking is stable across runs over the same corpus.
pub fn top_customers(scans: &[InvoiceScan], n: usize) -> Vec<CustomerTotal> {
    let mut by_customer: IndexMap<&str, CustomerTotal> = IndexMap::new();
    for scan in scans {
        let entry = by_customer
            .entry(scan.customer.as_str())
            .or_insert_with(|| CustomerTotal {
                customer: scan.customer.clone(),
                invoices: 0,
                total: Decimal::ZERO,
            });
        entry.invoices += 1;
        entry.total += scan.total;
    }
    let mut rows: Vec<CustomerTotal> = by_customer.into_values().collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows.truncate(n);
    rows
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgingBucket {
    pub label: &'static str,
    pub invoices: u64,
    pub total: Decimal,
}

/// Receivables aging relative to `today`: five fixed buckets, always all
/// present. Invoices without a due date and invoices not yet due both land
/// in `Current`.
pub fn aging_buckets(scans: &[InvoiceScan], today: NaiveDate) -> Vec<AgingBucket> {
    let mut rows: Vec<AgingBucket> = AGING_LABELS
        .iter()
        .map(|&label| AgingBucket {
            label,
            invoices: 0,
            total: Decimal::ZERO,
        })
        .collect();
    for scan in scans {
        let days_overdue = scan
            .due_date
            .map(|due| (today - due).num_days())
            .unwrap_or(0);
        let idx = match days_overdue {
            d if d <= 0 => 0,
            1..=30 => 1,
            31..=60 => 2,
            61..=90 => 3,
            _ => 4,
        };
        rows[idx].invoices += 1;
        rows[idx].total += scan.total;
    }
    rows
}

/// The `n` invoices with the highest total, ties broken by invoice number.
pub fn top_invoices(scans: &[InvoiceScan], n: usize) -> Vec<InvoiceScan> {
    let mut rows = scans.to_vec();
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.invoice_number.cmp(&b.invoice_number))
    });
    rows.truncate(n);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderStats {
    pub files: u64,
    pub bytes: u64,
    pub median_bytes: u64,
    pub sidecars: u64,
    pub oldest_write: Option<DateTime<Utc>>,
    pub newest_write: Option<DateTime<Utc>>,
}

/// File-level shape of the corpus folder.
pub fn folder_stats(scans: &[InvoiceScan]) -> FolderStats {
    let mut stats = FolderStats::default();
    let mut sizes: Vec<u64> = Vec::with_capacity(scans.len());
    for scan in scans {
        stats.files += 1;
        stats.bytes += scan.file_bytes;
        sizes.push(scan.file_bytes);
        if scan.has_json_sidecar {
            stats.sidecars += 1;
        }
        stats.oldest_write = Some(match stats.oldest_write {
            Some(t) => t.min(scan.last_write),
            None => scan.last_write,
        });
        stats.newest_write = Some(match stats.newest_write {
            Some(t) => t.max(scan.last_write),
            None => scan.last_write,
        });
    }
    if !sizes.is_empty() {
        sizes.sort_unstable();
        stats.median_bytes = sizes[sizes.len() / 2];
    }
    stats
}

/// Case-insensitive substring match on invoice number and customer name,
/// newest write first, capped at [`SEARCH_LIMIT`] rows.
pub fn search(scans: &[InvoiceScan], term: &str) -> Vec<InvoiceScan> {
    let needle = term.to_lowercase();
    let mut hits: Vec<InvoiceScan> = scans
        .iter()
        .filter(|s| {
            s.invoice_number.to_lowercase().contains(&needle)
                || s.customer.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    hits.sort_by(|a, b| b.last_write.cmp(&a.last_write));
    hits.truncate(SEARCH_LIMIT);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn scan(number: &str, customer: &str, currency: &str, total: Decimal) -> InvoiceScan {
        InvoiceScan {
            path: PathBuf::from(format!("{number}.xml")),
            invoice_number: number.to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            due_date: None,
            customer: customer.to_string(),
            currency: currency.to_string(),
            subtotal: total,
            tax: Decimal::ZERO,
            total,
            item_count: 1,
            vat_rates: vec![dec!(0.19)],
            has_json_sidecar: false,
            file_bytes: 10,
            last_write: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn currency_totals_sort_by_total_descending() {
        let scans = vec![
            scan("A", "X", "EUR", dec!(10.00)),
            scan("B", "X", "USD", dec!(100.00)),
            scan("C", "X", "EUR", dec!(20.00)),
        ];
        let rows = totals_by_currency(&scans);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].currency, "USD");
        assert_eq!(rows[1].currency, "EUR");
        assert_eq!(rows[1].invoices, 2);
        assert_eq!(rows[1].total, dec!(30.00));
    }

    #[test]
    fn vat_histogram_counts_invoices_not_lines() {
        let mut a = scan("A", "X", "EUR", dec!(10.00));
        a.vat_rates = vec![dec!(0.07), dec!(0.19)];
        let mut b = scan("B", "X", "EUR", dec!(10.00));
        b.vat_rates = vec![dec!(0.19)];

        let rows = vat_histogram(&[a, b]);
        assert_eq!(rows[0], VatBucket { rate: dec!(0.19), invoices: 2 });
        assert_eq!(rows[1], VatBucket { rate: dec!(0.07), invoices: 1 });
    }

    #[test]
    fn daily_histogram_is_dense_and_windowed() {
        let today = date(2025, 6, 15);
        let mut a = scan("A", "X", "EUR", dec!(1.00));
        a.issue_date = date(2025, 6, 15);
        let mut b = scan("B", "X", "EUR", dec!(1.00));
        b.issue_date = date(2025, 6, 15);
        let mut old = scan("C", "X", "EUR", dec!(1.00));
        old.issue_date = date(2025, 1, 1);

        let rows = daily_histogram(&[a, b, old], today);
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].date, date(2025, 5, 17));
        assert_eq!(rows[29].date, today);
        assert_eq!(rows[29].invoices, 2);
        assert_eq!(rows.iter().map(|r| r.invoices).sum::<u64>(), 2);
    }

    #[test]
    fn top_customers_breaks_ties_by_first_seen() {
        let scans = vec![
            scan("A", "Alpha", "EUR", dec!(50.00)),
            scan("B", "Beta", "EUR", dec!(50.00)),
            scan("C", "Gamma", "EUR", dec!(10.00)),
        ];
        let rows = top_customers(&scans, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer, "Alpha");
        assert_eq!(rows[1].customer, "Beta");
    }

    #[test]
    fn aging_buckets_are_fixed_and_boundary_exact() {
        let today = date(2025, 6, 30);
        let mut current = scan("A", "X", "EUR", dec!(1.00));
        current.due_date = Some(date(2025, 7, 10));
        let mut no_due = scan("B", "X", "EUR", dec!(1.00));
        no_due.due_date = None;
        let mut d30 = scan("C", "X", "EUR", dec!(1.00));
        d30.due_date = Some(date(2025, 5, 31));
        let mut d31 = scan("D", "X", "EUR", dec!(1.00));
        d31.due_date = Some(date(2025, 5, 30));
        let mut d91 = scan("E", "X", "EUR", dec!(1.00));
        d91.due_date = Some(date(2025, 3, 31));

        let rows = aging_buckets(&[current, no_due, d30, d31, d91], today);
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Current", "1–30", "31–60", "61–90", "90+"]);
        assert_eq!(rows[0].invoices, 2);
        assert_eq!(rows[1].invoices, 1);
        assert_eq!(rows[2].invoices, 1);
        assert_eq!(rows[3].invoices, 0);
        assert_eq!(rows[4].invoices, 1);
    }

    #[test]
    fn top_invoices_breaks_ties_by_number() {
        let scans = vec![
            scan("B", "X", "EUR", dec!(10.00)),
            scan("A", "X", "EUR", dec!(10.00)),
            scan("C", "X", "EUR", dec!(99.00)),
        ];
        let rows = top_invoices(&scans, 3);
        assert_eq!(rows[0].invoice_number, "C");
        assert_eq!(rows[1].invoice_number, "A");
        assert_eq!(rows[2].invoice_number, "B");
    }

    #[test]
    fn folder_stats_track_extremes() {
        let mut a = scan("A", "X", "EUR", dec!(1.00));
        a.file_bytes = 100;
        a.has_json_sidecar = true;
        let mut b = scan("B", "X", "EUR", dec!(1.00));
        b.file_bytes = 50;
        b.last_write = a.last_write + Duration::hours(1);

        let stats = folder_stats(&[a.clone(), b.clone()]);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 150);
        assert_eq!(stats.median_bytes, 100);
        assert_eq!(stats.sidecars, 1);
        assert_eq!(stats.oldest_write, Some(a.last_write));
        assert_eq!(stats.newest_write, Some(b.last_write));

        assert_eq!(folder_stats(&[]), FolderStats::default());
    }

    #[test]
    fn search_is_case_insensitive_and_capped() {
        let scans: Vec<InvoiceScan> = (0..60)
            .map(|i| scan(&format!("INV-{i:03}"), "Acme GmbH", "EUR", dec!(1.00)))
            .collect();
        assert_eq!(search(&scans, "acme").len(), SEARCH_LIMIT);
        assert_eq!(search(&scans, "INV-059").len(), 1);
        assert_eq!(search(&scans, "inv-059").len(), 1);
        assert!(search(&scans, "zzz").is_empty());
    }
}
