//! Region to currency resolution
//!
//! The user's region comes from their profile as an ISO 3166-1 alpha-2 code.
//! Lookups never fail: a missing or unmapped region resolves to
//! `DEFAULT_CURRENCY`.

/// Currency used when the region is unknown
pub const DEFAULT_CURRENCY: &str = "USD";

const REGION_CURRENCIES: &[(&str, &str)] = &[
    // North America
    ("US", "USD"),
    ("CA", "CAD"),
    ("MX", "MXN"),
    // Eurozone
    ("AT", "EUR"),
    ("BE", "EUR"),
    ("CY", "EUR"),
    ("DE", "EUR"),
    ("EE", "EUR"),
    ("ES", "EUR"),
    ("FI", "EUR"),
    ("FR", "EUR"),
    ("GR", "EUR"),
    ("HR", "EUR"),
    ("IE", "EUR"),
    ("IT", "EUR"),
    ("LT", "EUR"),
    ("LU", "EUR"),
    ("LV", "EUR"),
    ("MT", "EUR"),
    ("NL", "EUR"),
    ("PT", "EUR"),
    ("SI", "EUR"),
    ("SK", "EUR"),
    // Rest of Europe
    ("GB", "GBP"),
    ("CH", "CHF"),
    ("SE", "SEK"),
    ("NO", "NOK"),
    ("DK", "DKK"),
    ("PL", "PLN"),
    ("CZ", "CZK"),
    ("TR", "TRY"),
    ("RU", "RUB"),
    // Middle East
    ("SA", "SAR"),
    ("AE", "AED"),
    ("QA", "QAR"),
    ("KW", "KWD"),
    ("BH", "BHD"),
    ("OM", "OMR"),
    ("JO", "JOD"),
    ("IL", "ILS"),
    // Africa
    ("EG", "EGP"),
    ("ZA", "ZAR"),
    ("NG", "NGN"),
    ("KE", "KES"),
    // Asia Pacific
    ("JP", "JPY"),
    ("CN", "CNY"),
    ("KR", "KRW"),
    ("IN", "INR"),
    ("PK", "PKR"),
    ("SG", "SGD"),
    ("HK", "HKD"),
    ("ID", "IDR"),
    ("TH", "THB"),
    ("VN", "VND"),
    ("PH", "PHP"),
    ("AU", "AUD"),
    ("NZ", "NZD"),
    // South America
    ("BR", "BRL"),
    ("AR", "ARS"),
];

/// Currency code for a region, `DEFAULT_CURRENCY` when unknown
pub fn get_currency_for_country(region: Option<&str>) -> &'static str {
    let Some(region) = region.map(str::trim) else {
        return DEFAULT_CURRENCY;
    };

    REGION_CURRENCIES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(region))
        .map_or(DEFAULT_CURRENCY, |(_, currency)| currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::currency::iso_currency;
    use rstest::rstest;

    #[rstest]
    #[case::us(Some("US"), "USD")]
    #[case::eurozone(Some("DE"), "EUR")]
    #[case::lowercase(Some("sa"), "SAR")]
    #[case::padded(Some(" gb "), "GBP")]
    #[case::japan(Some("JP"), "JPY")]
    #[case::unknown(Some("ZZ"), DEFAULT_CURRENCY)]
    #[case::empty(Some(""), DEFAULT_CURRENCY)]
    #[case::none(None, DEFAULT_CURRENCY)]
    fn test_get_currency_for_country(#[case] region: Option<&str>, #[case] expected: &str) {
        assert_eq!(get_currency_for_country(region), expected);
    }

    #[test]
    fn test_every_mapped_currency_has_a_symbol() {
        for (region, code) in REGION_CURRENCIES {
            assert!(iso_currency(code).is_some(), "{region} maps to unknown {code}");
        }
    }
}
