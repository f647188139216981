//! Presentation formatting
//!
//! - `currency` - ISO currency lookup and money rendering with fallback
//! - `locale` - Per-locale separators and symbol placement
//! - `region` - Region to currency resolution

pub mod currency;
pub mod locale;
pub mod region;

pub use currency::{currency_symbol, format_currency, format_decimal, DEFAULT_LOCALE};
pub use region::{get_currency_for_country, DEFAULT_CURRENCY};

use rust_decimal::Decimal;

/// How report amounts are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_code: String,
    pub locale: Option<String>,
}

impl DisplayOptions {
    pub fn new(currency_code: impl Into<String>, locale: Option<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            locale,
        }
    }

    /// Options for a user in `region`
    pub fn for_region(region: Option<&str>, locale: Option<String>) -> Self {
        Self::new(get_currency_for_country(region), locale)
    }

    pub fn format(&self, amount: Decimal) -> String {
        format_decimal(amount, &self.currency_code, self.locale.as_deref())
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DisplayOptions::default();
        assert_eq!(options.currency_code, "USD");
        assert_eq!(options.format(Decimal::new(125000, 2)), "$1,250.00");
    }

    #[test]
    fn test_for_region() {
        let options = DisplayOptions::for_region(Some("fr"), Some("fr-FR".to_string()));
        assert_eq!(options.currency_code, "EUR");
        assert_eq!(options.format(Decimal::new(995, 2)), "9,95\u{a0}€");
    }
}
