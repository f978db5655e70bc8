//! `fakturo-pipeline`: concurrent generation runs against a target folder.
//!
//! A run fans invoice construction out over worker batches, funnels all file
//! writes through a shared i/o gate, and reports per-unit failures without
//! aborting the rest of the run. Invalid configuration is the only fatal
//! condition.

pub mod generate;
pub mod purge;

use thiserror::Error;

use fakturo_core::CoreError;
use fakturo_documents::DocumentError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub use generate::{GenerationReport, ProgressFn, RunOptions, TimestampMode, generate};
pub use purge::{PurgeReport, purge};
