//! Randomized invoice construction.

use chrono::{Duration, Utc};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use fakturo_core::round_money;

use crate::config::GeneratorConfig;
use crate::data;
use crate::invoice::{Address, Customer, Invoice, LineItem};

/// Builds internally consistent invoices from a validated configuration.
///
/// Each builder owns its RNG, so concurrent workers hold one builder each and
/// never share mutable state. The invoice number is left empty; the pipeline
/// assigns it after allocation.
pub struct InvoiceBuilder {
    cfg: GeneratorConfig,
    rng: SmallRng,
}

impl InvoiceBuilder {
    pub fn new(cfg: &GeneratorConfig, seed: u64) -> Self {
        Self {
            cfg: cfg.clone(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Derive a per-batch seed from the configured base seed.
    ///
    /// Distinct batches must not replay the same random stream; 7919 (the
    /// 1000th prime) spreads consecutive batch indices across the seed space.
    pub fn batch_seed(cfg: &GeneratorConfig, batch_index: u64) -> u64 {
        cfg.seed.wrapping_add(batch_index.wrapping_mul(7919))
    }

    /// Produce one invoice with all derived totals populated.
    pub fn build(&mut self) -> Invoice {
        let today = Utc::now().date_naive();
        let issue_date = today - Duration::days(self.rng.gen_range(0..=30));
        let term_idx = self.rng.gen_range(0..self.cfg.payment_terms_days.len());
        let term_days = self.cfg.payment_terms_days[term_idx];
        let due_date = issue_date + Duration::days(term_days);

        let item_count = match self.cfg.fixed_item_count {
            Some(n) => n,
            None => self
                .rng
                .gen_range(self.cfg.min_line_items..=self.cfg.max_line_items),
        };
        let items: Vec<LineItem> = (0..item_count).map(|_| self.build_item()).collect();

        let mut invoice = Invoice {
            invoice_number: String::new(),
            issue_date,
            due_date: Some(due_date),
            bill_to: self.build_customer(),
            currency: self.cfg.currency.clone(),
            items,
            subtotal: Decimal::ZERO,
            tax_rate: self.cfg.default_vat_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            payment_terms: format!("Net {term_days}"),
            iban: self.fake_iban(),
            bic: self.fake_bic(),
            vendor_vat_id: self.fake_vat_id(),
            customer_vat_id: self.fake_vat_id(),
            notes: self.sentence(),
        };
        finish_totals(&mut invoice);
        invoice
    }

    // Finishing step lives outside item creation: totals are derived only
    // once every line item exists.
    fn build_item(&mut self) -> LineItem {
        let unit_price = self.price_in_range();
        let qty = self.rng.gen_range(1..=12u32);
        let vat_idx = self.rng.gen_range(0..self.cfg.vat_pool.len());
        let vat_rate = self.cfg.vat_pool[vat_idx];
        let line_total = round_money(unit_price * Decimal::from(qty));
        LineItem {
            sku: self.fake_ean13(),
            description: format!(
                "{} {}",
                self.pick_str(data::PRODUCT_ADJECTIVES),
                self.pick_str(data::PRODUCT_NOUNS)
            ),
            qty,
            unit_price,
            vat_rate,
            line_total,
        }
    }

    fn build_customer(&mut self) -> Customer {
        let pool = data::pool(self.cfg.locale);
        let name = format!(
            "{} {}",
            self.pick_str(pool.company_base),
            self.pick_str(pool.company_suffix)
        );
        let email = format!(
            "{}.{}@{}",
            self.pick_str(pool.first_names).to_lowercase(),
            self.pick_str(pool.last_names).to_lowercase(),
            self.pick_str(data::EMAIL_DOMAINS)
        );
        let address = Address {
            street: format!("{} {}", self.rng.gen_range(1..=240), self.pick_str(pool.streets)),
            zip_code: format!("{:05}", self.rng.gen_range(1_000..=99_999)),
            city: self.pick_str(pool.cities).to_string(),
            country: pool.country.to_string(),
        };
        Customer {
            name,
            email,
            address,
        }
    }

    /// Random 2-decimal price within the configured range.
    fn price_in_range(&mut self) -> Decimal {
        let min_cents = (self.cfg.min_unit_price * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(1)
            .max(1);
        let max_cents = (self.cfg.max_unit_price * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(min_cents)
            .max(min_cents);
        Decimal::new(self.rng.gen_range(min_cents..=max_cents), 2)
    }

    fn fake_ean13(&mut self) -> String {
        self.rng
            .gen_range(1_000_000_000_000u64..=9_999_999_999_999)
            .to_string()
    }

    fn fake_iban(&mut self) -> String {
        let mut s = format!("DE{:02}", self.rng.gen_range(10..=99));
        for _ in 0..5 {
            s.push(' ');
            for _ in 0..4 {
                s.push(char::from(b'0' + self.rng.gen_range(0..10u8)));
            }
        }
        s.push(' ');
        s.push(char::from(b'0' + self.rng.gen_range(0..10u8)));
        s.push(char::from(b'0' + self.rng.gen_range(0..10u8)));
        s
    }

    fn fake_bic(&mut self) -> String {
        let mut s: String = (0..4)
            .map(|_| char::from(b'A' + self.rng.gen_range(0..26u8)))
            .collect();
        s.push_str("DEFF");
        s
    }

    fn fake_vat_id(&mut self) -> String {
        format!("DE{}", self.rng.gen_range(100_000_000..=999_999_999u64))
    }

    fn sentence(&mut self) -> String {
        let n = self.rng.gen_range(5..=9);
        let mut words: Vec<&str> = (0..n).map(|_| self.pick_str(data::LOREM_WORDS)).collect();
        let mut out = String::new();
        if let Some(first) = words.first_mut() {
            let mut chars = first.chars();
            if let Some(c) = chars.next() {
                out.push(c.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
        for w in words.iter().skip(1) {
            out.push(' ');
            out.push_str(w);
        }
        out.push('.');
        out
    }

    fn pick_str(&mut self, xs: &'static [&'static str]) -> &'static str {
        xs[self.rng.gen_range(0..xs.len())]
    }
}

/// Compute the derived financial fields from the item list.
///
/// Tax is rounded per line and then summed, never derived from the subtotal.
pub fn finish_totals(invoice: &mut Invoice) {
    invoice.subtotal = round_money(invoice.items.iter().map(|i| i.line_total).sum());
    invoice.tax_amount = invoice
        .items
        .iter()
        .map(|i| round_money(i.line_total * i.vat_rate))
        .sum();
    invoice.total = round_money(invoice.subtotal + invoice.tax_amount);
}
