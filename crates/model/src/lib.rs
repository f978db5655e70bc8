//! `fakturo-model`: in-memory invoice model, randomized builder, numbering.
//!
//! Everything here is pure and deterministic given a seed; persistence and
//! concurrency live in the pipeline crates.

pub mod builder;
pub mod config;
mod data;
pub mod invoice;
pub mod numbering;

pub use builder::InvoiceBuilder;
pub use config::{GeneratorConfig, Locale};
pub use invoice::{Address, Customer, Invoice, LineItem};
pub use numbering::{InvoiceNumberAllocator, format_invoice_number};
