//! `fakturo-scanner`: bounded-concurrency corpus scan.
//!
//! Reads every primary document in a folder into denormalized
//! [`InvoiceScan`] records. The scan never fails as a whole: unreadable or
//! malformed files are skipped and logged, a missing folder is an empty
//! corpus.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use fakturo_documents::{filename, parse_summary};

/// One scanned document, flattened for validation and aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceScan {
    pub path: PathBuf,
    pub invoice_number: String,
    /// Unparsable issue dates collapse to the epoch date rather than
    /// dropping the record.
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub customer: String,
    pub currency: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub item_count: usize,
    /// Distinct VAT rates used on the invoice's lines, ascending.
    pub vat_rates: Vec<Decimal>,
    pub has_json_sidecar: bool,
    pub file_bytes: u64,
    pub last_write: DateTime<Utc>,
}

/// Scan `dir` with at most `workers` files in flight at once.
///
/// Results come back sorted by invoice number so downstream output is stable
/// regardless of completion order.
pub async fn scan(dir: &Path, workers: usize) -> Vec<InvoiceScan> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => {
            debug!(dir = %dir.display(), "scan directory not readable, treating as empty");
            return Vec::new();
        }
    };

    let gate = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if !filename::is_invoice_file(&path) {
            continue;
        }
        let gate = Arc::clone(&gate);
        tasks.spawn(async move {
            let _permit = gate.acquire().await.expect("scan gate closed");
            scan_one(&path).await
        });
    }

    let mut scans = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Ok(Some(scan)) = joined {
            scans.push(scan);
        }
    }
    scans.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
    info!(dir = %dir.display(), invoices = scans.len(), "scan finished");
    scans
}

async fn scan_one(path: &Path) -> Option<InvoiceScan> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };
    let summary = match parse_summary(&bytes) {
        Some(summary) => summary,
        None => {
            debug!(path = %path.display(), "skipping malformed document");
            return None;
        }
    };

    let metadata = tokio::fs::metadata(path).await.ok();
    let file_bytes = metadata.as_ref().map(|m| m.len()).unwrap_or(bytes.len() as u64);
    let modified = metadata
        .and_then(|m| m.modified().ok())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let has_json_sidecar = tokio::fs::try_exists(filename::sidecar_path(path))
        .await
        .unwrap_or(false);

    Some(InvoiceScan {
        path: path.to_path_buf(),
        invoice_number: summary.invoice_number,
        issue_date: summary.issue_date.unwrap_or_default(),
        due_date: summary.due_date,
        customer: summary.customer,
        currency: summary.currency,
        subtotal: summary.subtotal,
        tax: summary.tax,
        total: summary.total,
        item_count: summary.item_count,
        vat_rates: summary.vat_rates,
        has_json_sidecar,
        file_bytes,
        last_write: DateTime::<Utc>::from(modified),
    })
}
