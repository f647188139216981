//! Money rendering
//!
//! `format_currency` is the entry point for UI amounts (which arrive as
//! floating point from the network layer); `format_decimal` is used for
//! basket totals that are already exact. Both produce a locale-correct string
//! when the locale is supported and the currency is known, and fall back to
//! `<symbol><amount to 2dp>` otherwise. Neither ever fails.
//!
//! Currency symbols and minor units come from the ISO 4217 set in
//! `rusty_money`; an amount is wrapped in a `Money` before locale rendering.

use super::locale::resolve_locale;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{iso, Money};

/// Locale used when the caller does not pass one
pub const DEFAULT_LOCALE: &str = "en";

/// ISO 4217 metadata for a currency code (case-insensitive)
pub fn iso_currency(code: &str) -> Option<&'static iso::Currency> {
    iso::find(&code.trim().to_ascii_uppercase())
}

/// Symbol for a currency code, `""` when unknown
pub fn currency_symbol(code: &str) -> &'static str {
    iso_currency(code).map_or("", |currency| currency.symbol)
}

/// Format a UI amount
///
/// `None`, NaN and infinite amounts render as `""`. A finite amount too large
/// for `Decimal` skips locale rendering and goes straight to the fallback.
pub fn format_currency(amount: Option<f64>, currency_code: &str, locale: Option<&str>) -> String {
    let Some(amount) = amount.filter(|amount| amount.is_finite()) else {
        return String::new();
    };
    match Decimal::from_f64(amount) {
        Some(amount) => format_decimal(amount, currency_code, locale),
        None => format!("{}{:.2}", currency_symbol(currency_code), amount),
    }
}

/// Format an exact amount
pub fn format_decimal(amount: Decimal, currency_code: &str, locale: Option<&str>) -> String {
    let locale = locale.unwrap_or(DEFAULT_LOCALE);
    match (resolve_locale(locale), iso_currency(currency_code)) {
        (Some(format), Some(currency)) => format.render(&Money::from_decimal(amount, currency)),
        _ => fallback(amount, currency_code),
    }
}

fn fallback(amount: Decimal, currency_code: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{}{:.2}", currency_symbol(currency_code), rounded)
}
