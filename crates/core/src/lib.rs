//! `fakturo-core`: shared foundation for the invoice corpus tooling.
//!
//! This crate contains **pure** building blocks (no I/O, no concurrency):
//! locale-invariant money arithmetic and the shared error model.

pub mod error;
pub mod money;

pub use error::{CoreError, CoreResult};
pub use money::{parse_amount, round_money};
