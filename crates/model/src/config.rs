//! Generator configuration.

use fakturo_core::{CoreError, CoreResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Locale driving the embedded name/word pools.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Map a BCP-47-ish tag (`"de"`, `"de_AT"`, `"en_GB"`) onto a supported
    /// locale; anything unknown falls back to English.
    pub fn parse(tag: &str) -> Self {
        match tag.split(['-', '_']).next().unwrap_or("") {
            t if t.eq_ignore_ascii_case("de") => Locale::De,
            _ => Locale::En,
        }
    }
}

/// Tunables for invoice synthesis.
///
/// Validated once before a run starts; a builder never re-checks these per
/// unit. Invalid configuration is the only fatal condition of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub locale: Locale,
    /// ISO 4217 code written verbatim into every document.
    pub currency: String,
    pub default_vat_rate: Decimal,
    /// Per-line VAT rates are drawn from this pool.
    pub vat_pool: Vec<Decimal>,
    pub min_unit_price: Decimal,
    pub max_unit_price: Decimal,
    pub min_line_items: u32,
    pub max_line_items: u32,
    /// When set, every invoice gets exactly this many items.
    pub fixed_item_count: Option<u32>,
    /// Payment term options in days; due date = issue date + one of these.
    pub payment_terms_days: Vec<i64>,
    /// Base RNG seed; worker batches derive their own seeds from it.
    pub seed: u64,
    pub invoice_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            currency: "EUR".to_string(),
            default_vat_rate: dec!(0.19),
            vat_pool: vec![dec!(0.19), dec!(0.07), Decimal::ZERO],
            min_unit_price: dec!(2),
            max_unit_price: dec!(1200),
            min_line_items: 100,
            max_line_items: 500,
            fixed_item_count: None,
            payment_terms_days: vec![7, 14, 30],
            seed: 42,
            invoice_prefix: "INV".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Check the configuration before any work starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.currency.trim().is_empty() {
            return Err(CoreError::config("currency must not be empty"));
        }
        if self.invoice_prefix.trim().is_empty() {
            return Err(CoreError::config("invoice prefix must not be empty"));
        }
        if self.min_unit_price <= Decimal::ZERO {
            return Err(CoreError::config("min unit price must be positive"));
        }
        if self.max_unit_price < self.min_unit_price {
            return Err(CoreError::config("max unit price below min unit price"));
        }
        if self.min_line_items == 0 {
            return Err(CoreError::config("min line items must be at least 1"));
        }
        if self.max_line_items < self.min_line_items {
            return Err(CoreError::config("max line items below min line items"));
        }
        if let Some(n) = self.fixed_item_count {
            if n == 0 || n > 10_000 {
                return Err(CoreError::config("fixed item count must be 1..=10000"));
            }
        }
        if self.payment_terms_days.is_empty() {
            return Err(CoreError::config("payment terms pool must not be empty"));
        }
        if self.payment_terms_days.iter().any(|d| *d <= 0) {
            return Err(CoreError::config("payment terms must be positive day counts"));
        }
        if self.vat_pool.is_empty() {
            return Err(CoreError::config("VAT pool must not be empty"));
        }
        if self
            .vat_pool
            .iter()
            .any(|r| *r < Decimal::ZERO || *r > Decimal::ONE)
        {
            return Err(CoreError::config("VAT rates must be fractions in 0..=1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut cfg = GeneratorConfig {
            min_unit_price: dec!(10),
            max_unit_price: dec!(2),
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg = GeneratorConfig {
            min_line_items: 5,
            max_line_items: 2,
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_pools() {
        let cfg = GeneratorConfig {
            vat_pool: vec![dec!(1.5)],
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = GeneratorConfig {
            payment_terms_days: vec![],
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = GeneratorConfig {
            payment_terms_days: vec![14, 0],
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn locale_parsing_falls_back_to_english() {
        assert_eq!(Locale::parse("de"), Locale::De);
        assert_eq!(Locale::parse("de_AT"), Locale::De);
        assert_eq!(Locale::parse("DE-CH"), Locale::De);
        assert_eq!(Locale::parse("en_GB"), Locale::En);
        assert_eq!(Locale::parse("fr"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }
}
