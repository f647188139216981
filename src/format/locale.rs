//! Locale number conventions for money
//!
//! Only the conventions the apps ship translations for are listed. Tags are
//! matched case-insensitively with `_` accepted for `-`; an unlisted region
//! falls back to its language (`en-AU` renders like `en`).

use rust_decimal::RoundingStrategy;
use rusty_money::{iso, Money};

/// Where the currency symbol goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Number conventions of one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub tag: &'static str,
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    pub symbol_position: SymbolPosition,
    /// Placed between symbol and number
    pub symbol_spacing: &'static str,
    /// Integer digits needed before grouping kicks in
    pub min_grouping_digits: usize,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

const fn prefix(tag: &'static str, group: &'static str, decimal: &'static str) -> LocaleFormat {
    LocaleFormat {
        tag,
        group_separator: group,
        decimal_separator: decimal,
        symbol_position: SymbolPosition::Prefix,
        symbol_spacing: "",
        min_grouping_digits: 4,
    }
}

const fn suffix(tag: &'static str, group: &'static str, decimal: &'static str) -> LocaleFormat {
    LocaleFormat {
        tag,
        group_separator: group,
        decimal_separator: decimal,
        symbol_position: SymbolPosition::Suffix,
        symbol_spacing: NBSP,
        min_grouping_digits: 4,
    }
}

const LOCALES: &[LocaleFormat] = &[
    prefix("en", ",", "."),
    prefix("en-US", ",", "."),
    prefix("en-GB", ",", "."),
    prefix("ja", ",", "."),
    prefix("zh", ",", "."),
    prefix("ko", ",", "."),
    LocaleFormat {
        symbol_spacing: " ",
        ..prefix("nl", ".", ",")
    },
    LocaleFormat {
        symbol_spacing: NBSP,
        ..prefix("pt-BR", ".", ",")
    },
    LocaleFormat {
        symbol_spacing: NBSP,
        ..prefix("de-CH", "’", ".")
    },
    suffix("de", ".", ","),
    suffix("it", ".", ","),
    suffix("pt", NBSP, ","),
    suffix("fr", NARROW_NBSP, ","),
    suffix("sv", NBSP, ","),
    suffix("pl", NBSP, ","),
    suffix("tr", ".", ","),
    LocaleFormat {
        min_grouping_digits: 5,
        ..suffix("es", ".", ",")
    },
];

fn find(tag: &str) -> Option<&'static LocaleFormat> {
    LOCALES.iter().find(|format| format.tag.eq_ignore_ascii_case(tag))
}

/// Resolve a locale tag: exact match first, then the language subtag
pub fn resolve_locale(tag: &str) -> Option<&'static LocaleFormat> {
    let tag = tag.trim().replace('_', "-");
    if tag.is_empty() {
        return None;
    }
    find(&tag).or_else(|| tag.split('-').next().and_then(find))
}

impl LocaleFormat {
    /// Render an amount with this locale's conventions
    ///
    /// The currency's ISO exponent decides the fraction digits.
    pub fn render(&self, money: &Money<'_, iso::Currency>) -> String {
        let currency = money.currency();
        let rounded = money
            .amount()
            .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.*}", currency.exponent as usize, rounded.abs());
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut number = self.group(integer);
        if let Some(fraction) = fraction {
            number.push_str(self.decimal_separator);
            number.push_str(fraction);
        }

        let sign = if negative { "-" } else { "" };
        match self.symbol_position {
            SymbolPosition::Prefix => {
                format!("{sign}{}{}{number}", currency.symbol, self.symbol_spacing)
            }
            SymbolPosition::Suffix => {
                format!("{sign}{number}{}{}", self.symbol_spacing, currency.symbol)
            }
        }
    }

    fn group(&self, integer: &str) -> String {
        if integer.len() < self.min_grouping_digits {
            return integer.to_string();
        }

        let mut grouped = String::with_capacity(integer.len() * 2);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push_str(self.group_separator);
            }
            grouped.push(digit);
        }
        grouped
    }
}
