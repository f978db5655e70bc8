//! `fakturo`: generate, inspect, and validate a synthetic invoice corpus.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use fakturo_model::{GeneratorConfig, InvoiceBuilder, InvoiceNumberAllocator, Locale, format_invoice_number};
use fakturo_pipeline::{ProgressFn, RunOptions, TimestampMode, generate, purge};
use fakturo_reports as reports;

#[derive(Parser)]
#[command(name = "fakturo", version, about = "Synthetic invoice corpus toolkit")]
struct Cli {
    /// Corpus folder all commands operate on.
    #[arg(long, global = true, default_value = "invoices")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a batch of invoice documents into the corpus folder.
    Generate {
        count: u64,
        /// Also write a JSON sidecar next to each XML document.
        #[arg(long)]
        sidecar: bool,
        /// Write single-line XML instead of indented.
        #[arg(long)]
        compact: bool,
        /// Exact line items per invoice instead of the random range.
        #[arg(long)]
        fixed_items: Option<u32>,
        /// Keep real file timestamps instead of backdating them.
        #[arg(long)]
        now: bool,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        currency: Option<String>,
        /// Locale tag for names and addresses, e.g. "de" or "en".
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Print one generated invoice as XML without touching the corpus.
    One {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Corpus overview: currency totals, VAT mix, recent volume, folder shape.
    Stats,
    /// Check the corpus for duplicates and arithmetic anomalies.
    Validate {
        /// Also write the findings as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Export the corpus summary as CSV.
    ExportCsv { path: PathBuf },
    /// Receivables aging buckets.
    Aging,
    /// Customers ranked by invoiced total.
    TopCustomers {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
    /// Find invoices by number or customer name.
    Search { term: String },
    /// Delete every corpus document in the folder.
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fakturo_observability::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            count,
            sidecar,
            compact,
            fixed_items,
            now,
            seed,
            currency,
            locale,
            workers,
        } => {
            let mut config = GeneratorConfig::default();
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(currency) = currency {
                config.currency = currency;
            }
            if let Some(tag) = locale {
                config.locale = Locale::parse(&tag);
            }
            config.fixed_item_count = fixed_items;

            let mut options = RunOptions::new(count, &cli.dir);
            options.json_sidecar = sidecar;
            options.pretty_xml = !compact;
            if now {
                options.timestamps = TimestampMode::Now;
            }
            if let Some(workers) = workers {
                options.workers = workers;
            }

            let progress: ProgressFn =
                Arc::new(|done, total| info!(done, total, "generation progress"));
            let report = generate(
                &config,
                &options,
                Arc::new(InvoiceNumberAllocator::default()),
                Some(progress),
            )
            .await?;
            println!(
                "wrote {} of {} invoices ({} failed) in {:.2?}",
                report.written, report.requested, report.failed, report.elapsed
            );
        }

        Command::One { seed } => {
            let config = GeneratorConfig {
                min_line_items: 3,
                max_line_items: 8,
                ..GeneratorConfig::default()
            };
            let mut invoice =
                InvoiceBuilder::new(&config, seed.unwrap_or(config.seed)).build();
            let allocator = InvoiceNumberAllocator::default();
            invoice.invoice_number = format_invoice_number(
                &config.invoice_prefix,
                Utc::now().date_naive(),
                allocator.next(),
            );
            let xml = fakturo_documents::write_invoice(&invoice, true)?;
            println!("{}", String::from_utf8_lossy(&xml));
        }

        Command::Stats => {
            let scans = scan(&cli.dir).await;
            let stats = reports::folder_stats(&scans);
            println!(
                "{} invoices, {} bytes, {} sidecars",
                stats.files, stats.bytes, stats.sidecars
            );
            println!("\nTotals by currency:");
            for row in reports::totals_by_currency(&scans) {
                println!(
                    "  {:<4} {:>6} invoices  subtotal {:>14}  tax {:>12}  total {:>14}",
                    row.currency, row.invoices, row.subtotal, row.tax, row.total
                );
            }
            println!("\nVAT rates in use:");
            for row in reports::vat_histogram(&scans) {
                println!("  {:>5}  {} invoices", row.rate, row.invoices);
            }
            println!("\nIssued in the last 30 days:");
            for row in reports::daily_histogram(&scans, Utc::now().date_naive()) {
                if row.invoices > 0 {
                    println!("  {}  {}", row.date, row.invoices);
                }
            }
            println!("\nLargest invoices:");
            for row in reports::top_invoices(&scans, 5) {
                println!(
                    "  {}  {}  {} {}",
                    row.invoice_number, row.customer, row.total, row.currency
                );
            }
        }

        Command::Validate { csv } => {
            let scans = scan(&cli.dir).await;
            let report = reports::validate(&scans, reports::DEFAULT_TOLERANCE);
            for group in &report.duplicates {
                println!(
                    "DUPLICATE {} ({} documents)",
                    group.invoice_number, group.count
                );
            }
            for finding in &report.findings {
                println!(
                    "{} {} {} [{}]",
                    finding.code,
                    finding.invoice_number,
                    finding.message,
                    finding.path.display()
                );
            }
            if let Some(path) = csv {
                tokio::fs::write(&path, reports::validation_csv(&report))
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "validation report written");
            }
            if report.is_clean() {
                println!("corpus is clean ({} invoices)", scans.len());
            } else {
                println!(
                    "{} findings, {} duplicate groups",
                    report.findings.len(),
                    report.duplicates.len()
                );
            }
        }

        Command::ExportCsv { path } => {
            let scans = scan(&cli.dir).await;
            tokio::fs::write(&path, reports::summary_csv(&scans))
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("exported {} invoices to {}", scans.len(), path.display());
        }

        Command::Aging => {
            let scans = scan(&cli.dir).await;
            for bucket in reports::aging_buckets(&scans, Utc::now().date_naive()) {
                println!(
                    "  {:<8} {:>6} invoices  {:>14}",
                    bucket.label, bucket.invoices, bucket.total
                );
            }
        }

        Command::TopCustomers { count } => {
            let scans = scan(&cli.dir).await;
            for (rank, row) in reports::top_customers(&scans, count).iter().enumerate() {
                println!(
                    "{:>3}. {:<40} {:>6} invoices  {:>14}",
                    rank + 1,
                    row.customer,
                    row.invoices,
                    row.total
                );
            }
        }

        Command::Search { term } => {
            let scans = scan(&cli.dir).await;
            let hits = reports::search(&scans, &term);
            for hit in &hits {
                println!(
                    "{}  {}  {}  {} {}",
                    hit.invoice_number, hit.issue_date, hit.customer, hit.total, hit.currency
                );
            }
            println!("{} match(es)", hits.len());
        }

        Command::Purge => {
            let report = purge(&cli.dir).await?;
            println!("deleted {} files ({} failed)", report.deleted, report.failed);
        }
    }
    Ok(())
}

async fn scan(dir: &std::path::Path) -> Vec<fakturo_scanner::InvoiceScan> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    fakturo_scanner::scan(dir, workers).await
}
