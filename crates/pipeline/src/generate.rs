//! The generation run: batching, persistence, timestamp shaping.

use std::fs::{File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime};

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use fakturo_core::CoreError;
use fakturo_documents::{filename, json, xml};
use fakturo_model::{GeneratorConfig, Invoice, InvoiceBuilder, InvoiceNumberAllocator, format_invoice_number};

use crate::PipelineError;

/// Five years, in minutes. Backdated documents land uniformly in this window.
const BACKDATE_WINDOW_MINUTES: i64 = 5 * 365 * 24 * 60;

/// Progress is reported every this many completed units.
const PROGRESS_STRIDE: u64 = 128;

/// How file modification times are set after writing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TimestampMode {
    /// Random past timestamp within the backdate window.
    #[default]
    Backdated,
    /// Leave the filesystem's write time untouched.
    Now,
}

/// Per-run knobs that are not part of the invoice content itself.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub count: u64,
    pub out_dir: PathBuf,
    /// Worker batch parallelism.
    pub workers: usize,
    /// Concurrent file writes allowed at once.
    pub io_permits: usize,
    pub json_sidecar: bool,
    pub pretty_xml: bool,
    pub timestamps: TimestampMode,
}

impl RunOptions {
    pub fn new(count: u64, out_dir: impl Into<PathBuf>) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            count,
            out_dir: out_dir.into(),
            workers,
            io_permits: workers.max(4),
            json_sidecar: false,
            pretty_xml: true,
            timestamps: TimestampMode::Backdated,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.count == 0 {
            return Err(CoreError::config("count must be at least 1"));
        }
        if self.workers == 0 {
            return Err(CoreError::config("workers must be at least 1"));
        }
        if self.io_permits == 0 {
            return Err(CoreError::config("io permits must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of one run. `written + failed == requested` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub requested: u64,
    pub written: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

/// Called with `(completed, total)` at the progress stride and once at the end.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Run a full generation: validate, batch, build, persist, backdate.
///
/// A failed unit is logged and counted; the run keeps going. The allocator is
/// shared so invoice numbers stay unique across overlapping runs in the same
/// process.
pub async fn generate(
    config: &GeneratorConfig,
    options: &RunOptions,
    allocator: Arc<InvoiceNumberAllocator>,
    progress: Option<ProgressFn>,
) -> Result<GenerationReport, PipelineError> {
    config.validate()?;
    options.validate()?;
    tokio::fs::create_dir_all(&options.out_dir).await?;

    let started = Instant::now();
    let total = options.count;
    let batch_size = batch_size(total, options.workers);
    info!(
        count = total,
        workers = options.workers,
        batch_size,
        out_dir = %options.out_dir.display(),
        "starting generation run"
    );

    let gate = Arc::new(Semaphore::new(options.io_permits));
    let completed = Arc::new(AtomicU64::new(0));
    let failed = Arc::new(AtomicU64::new(0));

    let mut tasks = JoinSet::new();
    let mut offset = 0u64;
    let mut batch_index = 0u64;
    while offset < total {
        let len = batch_size.min(total - offset);
        tasks.spawn(run_batch(BatchContext {
            cfg: config.clone(),
            options: options.clone(),
            batch_index,
            len,
            total,
            allocator: Arc::clone(&allocator),
            gate: Arc::clone(&gate),
            completed: Arc::clone(&completed),
            failed: Arc::clone(&failed),
            progress: progress.clone(),
        }));
        offset += len;
        batch_index += 1;
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            error!(error = %err, "generation batch aborted");
        }
    }

    let written = completed.load(Ordering::Relaxed);
    let failed = failed.load(Ordering::Relaxed);
    if let Some(progress) = &progress {
        progress(written, total);
    }
    let report = GenerationReport {
        requested: total,
        written,
        failed,
        elapsed: started.elapsed(),
    };
    info!(
        written = report.written,
        failed = report.failed,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "generation run finished"
    );
    Ok(report)
}

/// Units per worker batch. Each worker gets roughly four batches so stragglers
/// even out; tiny runs collapse to single-unit batches.
pub(crate) fn batch_size(count: u64, workers: usize) -> u64 {
    (count / (workers as u64 * 4)).max(1)
}

struct BatchContext {
    cfg: GeneratorConfig,
    options: RunOptions,
    batch_index: u64,
    len: u64,
    total: u64,
    allocator: Arc<InvoiceNumberAllocator>,
    gate: Arc<Semaphore>,
    completed: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
    progress: Option<ProgressFn>,
}

async fn run_batch(ctx: BatchContext) {
    let seed = InvoiceBuilder::batch_seed(&ctx.cfg, ctx.batch_index);
    let mut builder = InvoiceBuilder::new(&ctx.cfg, seed);
    // Separate stream from the builder's so timestamps do not echo content.
    let mut stamp_rng = SmallRng::seed_from_u64(seed.wrapping_add(0x9E37_79B9));
    debug!(batch = ctx.batch_index, units = ctx.len, "batch started");

    for _ in 0..ctx.len {
        let mut invoice = builder.build();
        let seq = ctx.allocator.next();
        invoice.invoice_number =
            format_invoice_number(&ctx.cfg.invoice_prefix, Utc::now().date_naive(), seq);

        let stamp = match ctx.options.timestamps {
            TimestampMode::Backdated => {
                let minutes = stamp_rng.gen_range(0..BACKDATE_WINDOW_MINUTES);
                Some(SystemTime::from(Utc::now() - chrono::Duration::minutes(minutes)))
            }
            TimestampMode::Now => None,
        };

        match persist_unit(&invoice, &ctx.options, stamp, &ctx.gate).await {
            Ok(()) => {
                let done = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_STRIDE == 0 {
                    if let Some(progress) = &ctx.progress {
                        progress(done, ctx.total);
                    }
                }
            }
            Err(err) => {
                warn!(invoice = %invoice.invoice_number, error = %err, "unit failed");
                ctx.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

async fn persist_unit(
    invoice: &Invoice,
    options: &RunOptions,
    stamp: Option<SystemTime>,
    gate: &Semaphore,
) -> Result<(), PipelineError> {
    let xml_bytes = xml::write_invoice(invoice, options.pretty_xml)?;
    let sidecar_bytes = if options.json_sidecar {
        Some(json::to_sidecar(invoice)?)
    } else {
        None
    };

    let xml_path = options.out_dir.join(filename::invoice_file_name(
        &invoice.invoice_number,
        invoice.issue_date,
    ));
    let sidecar = filename::sidecar_path(&xml_path);

    {
        let permit = gate.acquire().await.expect("i/o gate closed");
        tokio::fs::write(&xml_path, &xml_bytes).await?;
        if let Some(bytes) = &sidecar_bytes {
            tokio::fs::write(&sidecar, bytes).await?;
        }
        drop(permit);
    }

    if let Some(stamp) = stamp {
        let mut paths = vec![xml_path];
        if sidecar_bytes.is_some() {
            paths.push(sidecar);
        }
        tokio::task::spawn_blocking(move || set_write_times(&paths, stamp))
            .await
            .map_err(io::Error::other)??;
    }
    Ok(())
}

fn set_write_times(paths: &[PathBuf], stamp: SystemTime) -> io::Result<()> {
    let times = FileTimes::new().set_accessed(stamp).set_modified(stamp);
    for path in paths {
        open_for_times(path)?.set_times(times)?;
    }
    Ok(())
}

fn open_for_times(path: &Path) -> io::Result<File> {
    File::options().write(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_floors_at_one() {
        assert_eq!(batch_size(1, 8), 1);
        assert_eq!(batch_size(10, 8), 1);
    }

    #[test]
    fn batch_size_gives_each_worker_several_batches() {
        assert_eq!(batch_size(1_000, 5), 50);
        assert_eq!(batch_size(10_000, 8), 312);
    }

    #[test]
    fn options_validation_rejects_zeroes() {
        let mut opts = RunOptions::new(0, "out");
        assert!(opts.validate().is_err());

        opts = RunOptions::new(10, "out");
        opts.workers = 0;
        assert!(opts.validate().is_err());

        opts = RunOptions::new(10, "out");
        opts.io_permits = 0;
        assert!(opts.validate().is_err());

        assert!(RunOptions::new(10, "out").validate().is_ok());
    }

    #[test]
    fn default_options_floor_io_permits_at_four() {
        let opts = RunOptions::new(10, "out");
        assert!(opts.io_permits >= 4);
        assert!(opts.workers >= 1);
    }
}
