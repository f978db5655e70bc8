//! End-to-end: generate a corpus, scan it back, validate, aggregate, purge.

use std::sync::Arc;

use chrono::{Duration, Utc};

use fakturo_model::{GeneratorConfig, InvoiceNumberAllocator};
use fakturo_pipeline::{RunOptions, TimestampMode, generate, purge};
use fakturo_reports as reports;
use fakturo_scanner::scan;

fn small_config() -> GeneratorConfig {
    GeneratorConfig {
        min_line_items: 2,
        max_line_items: 5,
        ..GeneratorConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn generate_scan_validate_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config();
    let mut options = RunOptions::new(25, dir.path());
    options.json_sidecar = true;
    options.timestamps = TimestampMode::Now;
    options.workers = 4;

    let report = generate(
        &config,
        &options,
        Arc::new(InvoiceNumberAllocator::default()),
        None,
    )
    .await
    .unwrap();
    assert_eq!(report.requested, 25);
    assert_eq!(report.written, 25);
    assert_eq!(report.failed, 0);

    let scans = scan(dir.path(), 4).await;
    assert_eq!(scans.len(), 25);
    assert!(scans.iter().all(|s| s.has_json_sidecar));
    assert!(scans.iter().all(|s| s.item_count >= 2 && s.item_count <= 5));
    for pair in scans.windows(2) {
        assert!(pair[0].invoice_number < pair[1].invoice_number);
    }

    let validation = reports::validate(&scans, reports::DEFAULT_TOLERANCE);
    assert!(validation.is_clean(), "unexpected findings: {validation:?}");

    // A second scan of the unchanged folder is byte-for-byte identical.
    let again = scan(dir.path(), 4).await;
    assert_eq!(scans, again);

    let csv = reports::summary_csv(&scans);
    assert_eq!(csv.lines().count(), 26);

    let totals = reports::totals_by_currency(&scans);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].currency, "EUR");
    assert_eq!(totals[0].invoices, 25);

    let purged = purge(dir.path()).await.unwrap();
    assert_eq!(purged.deleted, 50);
    assert_eq!(purged.failed, 0);
    assert!(scan(dir.path(), 4).await.is_empty());
}

#[tokio::test]
async fn backdating_spreads_write_times_into_the_past() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config();
    let mut options = RunOptions::new(8, dir.path());
    options.workers = 2;
    options.timestamps = TimestampMode::Backdated;

    generate(
        &config,
        &options,
        Arc::new(InvoiceNumberAllocator::default()),
        None,
    )
    .await
    .unwrap();

    let now = Utc::now();
    let floor = now - Duration::days(5 * 365 + 1);
    let scans = scan(dir.path(), 2).await;
    assert_eq!(scans.len(), 8);
    for s in &scans {
        assert!(s.last_write <= now, "{} stamped in the future", s.invoice_number);
        assert!(s.last_write >= floor, "{} stamped too far back", s.invoice_number);
    }
}

#[tokio::test]
async fn invalid_configuration_fails_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never-created");
    let config = GeneratorConfig {
        payment_terms_days: vec![],
        ..small_config()
    };
    let options = RunOptions::new(5, &target);

    let err = generate(
        &config,
        &options,
        Arc::new(InvoiceNumberAllocator::default()),
        None,
    )
    .await;
    assert!(err.is_err());
    assert!(!target.exists());
}

#[tokio::test]
async fn shared_allocator_keeps_numbers_unique_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config();
    let allocator = Arc::new(InvoiceNumberAllocator::default());

    for seed in [1u64, 2] {
        let mut cfg = config.clone();
        cfg.seed = seed;
        let mut options = RunOptions::new(6, dir.path());
        options.workers = 2;
        options.timestamps = TimestampMode::Now;
        generate(&cfg, &options, Arc::clone(&allocator), None)
            .await
            .unwrap();
    }

    let scans = scan(dir.path(), 2).await;
    assert_eq!(scans.len(), 12);
    let mut numbers: Vec<_> = scans.iter().map(|s| s.invoice_number.clone()).collect();
    numbers.dedup();
    assert_eq!(numbers.len(), 12);
}
