//! Invoice number allocation and formatting.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

/// Thread-safe monotonic sequence for invoice numbers.
///
/// A single atomic counter is the only synchronization: values are unique,
/// strictly increasing, and never reused within a process lifetime, no matter
/// how many workers call [`next`](Self::next) concurrently.
#[derive(Debug)]
pub struct InvoiceNumberAllocator {
    counter: AtomicU64,
}

impl InvoiceNumberAllocator {
    /// Historical starting point; the first allocated sequence is 100001.
    pub const DEFAULT_START: u64 = 100_000;

    pub fn new(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }

    /// Allocate the next sequence number.
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for InvoiceNumberAllocator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START)
    }
}

/// Render `<prefix>-<YYYYMMDD>-<sequence>` with the sequence zero-padded to
/// six digits. Sequences beyond six digits widen the field; significant
/// digits are never dropped.
pub fn format_invoice_number(prefix: &str, date: NaiveDate, seq: u64) -> String {
    format!("{prefix}-{}-{seq:06}", date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_fixed_width() {
        assert_eq!(
            format_invoice_number("INV", date(2025, 1, 1), 1),
            "INV-20250101-000001"
        );
        assert_eq!(
            format_invoice_number("BILL", date(2024, 12, 31), 100_001),
            "BILL-20241231-100001"
        );
    }

    #[test]
    fn wide_sequences_are_not_truncated() {
        assert_eq!(
            format_invoice_number("INV", date(2025, 6, 15), 1_234_567),
            "INV-20250615-1234567"
        );
    }

    #[test]
    fn lexicographic_order_matches_sequence_within_a_day() {
        let d = date(2025, 3, 3);
        let a = format_invoice_number("INV", d, 42);
        let b = format_invoice_number("INV", d, 43);
        assert!(a < b);
    }

    #[test]
    fn concurrent_next_yields_distinct_gapless_values() {
        let allocator = Arc::new(InvoiceNumberAllocator::new(0));
        let workers = 8;
        let per_worker = 500;

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let alloc = Arc::clone(&allocator);
                thread::spawn(move || (0..per_worker).map(|_| alloc.next()).collect::<Vec<u64>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let values = handle.join().unwrap();
            // Monotonic per caller.
            for pair in values.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            for v in values {
                assert!(seen.insert(v), "value {v} handed out twice");
            }
        }

        let total = (workers * per_worker) as u64;
        assert_eq!(seen.len() as u64, total);
        // No gaps: exactly 1..=total was handed out.
        assert_eq!(seen.iter().min().copied(), Some(1));
        assert_eq!(seen.iter().max().copied(), Some(total));
    }
}
