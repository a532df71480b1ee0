//! Currency codes and minor-unit exponent tables
//!
//! The exponent of a currency (number of decimal places between major and
//! minor unit) is never looked up from a global. Callers resolve a
//! [`Currency`] through a [`CurrencyTable`] once, and the resolved value
//! carries its exponent from then on.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Largest minor-unit exponent in active ISO 4217 use (CLF, UYW)
pub const MAX_EXPONENT: u8 = 4;

/// ISO 4217 currency with its minor-unit exponent
///
/// Deserialization goes through [`Currency::new`], so a payload cannot
/// produce a currency the constructor would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CurrencyRepr", into = "CurrencyRepr")]
pub struct Currency {
    code: [u8; 3],
    exponent: u8,
}

impl Currency {
    /// Create a currency from a three-letter code and an exponent.
    ///
    /// Only checks the shape of the code. Use a [`CurrencyTable`] to make
    /// sure the code actually exists.
    pub fn new(code: &str, exponent: u8) -> Result<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(Error::InvalidCurrencyCode(code.to_string()));
        }
        if exponent > MAX_EXPONENT {
            return Err(Error::InvalidCurrencyCode(format!(
                "{} (exponent {} > {})",
                code, exponent, MAX_EXPONENT
            )));
        }

        Ok(Self {
            code: [bytes[0], bytes[1], bytes[2]],
            exponent,
        })
    }

    /// ISO 4217 code
    pub fn code(&self) -> &str {
        // Always ASCII, checked in `new`
        std::str::from_utf8(&self.code).unwrap_or_default()
    }

    /// Number of fractional digits of the minor unit
    pub fn exponent(&self) -> u8 {
        self.exponent
    }
}

/// Wire form of [`Currency`]
#[derive(Serialize, Deserialize)]
struct CurrencyRepr {
    code: String,
    exponent: u8,
}

impl TryFrom<CurrencyRepr> for Currency {
    type Error = Error;

    fn try_from(repr: CurrencyRepr) -> Result<Self> {
        Currency::new(&repr.code, repr.exponent)
    }
}

impl From<Currency> for CurrencyRepr {
    fn from(currency: Currency) -> Self {
        Self {
            code: currency.code().to_string(),
            exponent: currency.exponent,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Lookup of currency codes to minor-unit exponents
pub trait CurrencyTable {
    /// Exponent for `code`, if the table knows it
    fn exponent(&self, code: &str) -> Option<u8>;

    /// Whether `code` is part of this table
    fn is_known(&self, code: &str) -> bool {
        self.exponent(code).is_some()
    }

    /// Resolve a code into a [`Currency`]
    fn lookup(&self, code: &str) -> Result<Currency> {
        // Shape errors take precedence over "unknown"
        Currency::new(code, 0)?;
        let exponent = self
            .exponent(code)
            .ok_or_else(|| Error::UnknownCurrency(code.to_string()))?;
        Currency::new(code, exponent)
    }
}

/// Active ISO 4217 codes, sorted for binary search
const ISO_4217: &[(&str, u8)] = &[
    ("AED", 2), ("AFN", 2), ("ALL", 2), ("AMD", 2), ("ANG", 2), ("AOA", 2),
    ("ARS", 2), ("AUD", 2), ("AWG", 2), ("AZN", 2), ("BAM", 2), ("BBD", 2),
    ("BDT", 2), ("BGN", 2), ("BHD", 3), ("BIF", 0), ("BMD", 2), ("BND", 2),
    ("BOB", 2), ("BOV", 2), ("BRL", 2), ("BSD", 2), ("BTN", 2), ("BWP", 2),
    ("BYN", 2), ("BZD", 2), ("CAD", 2), ("CDF", 2), ("CHE", 2), ("CHF", 2),
    ("CHW", 2), ("CLF", 4), ("CLP", 0), ("CNY", 2), ("COP", 2), ("COU", 2),
    ("CRC", 2), ("CUC", 2), ("CUP", 2), ("CVE", 2), ("CZK", 2), ("DJF", 0),
    ("DKK", 2), ("DOP", 2), ("DZD", 2), ("EGP", 2), ("ERN", 2), ("ETB", 2),
    ("EUR", 2), ("FJD", 2), ("FKP", 2), ("GBP", 2), ("GEL", 2), ("GHS", 2),
    ("GIP", 2), ("GMD", 2), ("GNF", 0), ("GTQ", 2), ("GYD", 2), ("HKD", 2),
    ("HNL", 2), ("HTG", 2), ("HUF", 2), ("IDR", 2), ("ILS", 2), ("INR", 2),
    ("IQD", 3), ("IRR", 2), ("ISK", 0), ("JMD", 2), ("JOD", 3), ("JPY", 0),
    ("KES", 2), ("KGS", 2), ("KHR", 2), ("KMF", 0), ("KPW", 2), ("KRW", 0),
    ("KWD", 3), ("KYD", 2), ("KZT", 2), ("LAK", 2), ("LBP", 2), ("LKR", 2),
    ("LRD", 2), ("LSL", 2), ("LYD", 3), ("MAD", 2), ("MDL", 2), ("MGA", 2),
    ("MKD", 2), ("MMK", 2), ("MNT", 2), ("MOP", 2), ("MRU", 2), ("MUR", 2),
    ("MVR", 2), ("MWK", 2), ("MXN", 2), ("MXV", 2), ("MYR", 2), ("MZN", 2),
    ("NAD", 2), ("NGN", 2), ("NIO", 2), ("NOK", 2), ("NPR", 2), ("NZD", 2),
    ("OMR", 3), ("PAB", 2), ("PEN", 2), ("PGK", 2), ("PHP", 2), ("PKR", 2),
    ("PLN", 2), ("PYG", 0), ("QAR", 2), ("RON", 2), ("RSD", 2), ("RUB", 2),
    ("RWF", 0), ("SAR", 2), ("SBD", 2), ("SCR", 2), ("SDG", 2), ("SEK", 2),
    ("SGD", 2), ("SHP", 2), ("SLE", 2), ("SOS", 2), ("SRD", 2), ("SSP", 2),
    ("STN", 2), ("SVC", 2), ("SYP", 2), ("SZL", 2), ("THB", 2), ("TJS", 2),
    ("TMT", 2), ("TND", 3), ("TOP", 2), ("TRY", 2), ("TTD", 2), ("TWD", 2),
    ("TZS", 2), ("UAH", 2), ("UGX", 0), ("USD", 2), ("USN", 2), ("UYI", 0),
    ("UYU", 2), ("UYW", 4), ("UZS", 2), ("VED", 2), ("VES", 2), ("VND", 0),
    ("VUV", 0), ("WST", 2), ("XAF", 0), ("XCD", 2), ("XOF", 0), ("XPF", 0),
    ("YER", 2), ("ZAR", 2), ("ZMW", 2), ("ZWL", 2),
];

/// Built-in ISO 4217 table
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso4217;

impl CurrencyTable for Iso4217 {
    fn exponent(&self, code: &str) -> Option<u8> {
        ISO_4217
            .binary_search_by(|(candidate, _)| (*candidate).cmp(code))
            .ok()
            .map(|idx| ISO_4217[idx].1)
    }
}

/// ISO 4217 table with additional or overridden entries
#[derive(Debug, Clone, Default)]
pub struct CustomCurrencyTable {
    overrides: HashMap<String, u8>,
}

impl CustomCurrencyTable {
    /// Create an empty overlay over [`Iso4217`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or override a currency
    pub fn with_currency(mut self, code: &str, exponent: u8) -> Result<Self> {
        let currency = Currency::new(code, exponent)?;
        if let Some(previous) = Iso4217.exponent(code) {
            if previous != exponent {
                tracing::debug!(
                    currency = code,
                    iso_exponent = previous,
                    exponent,
                    "Overriding ISO 4217 exponent"
                );
            }
        }
        self.overrides
            .insert(currency.code().to_string(), currency.exponent());
        Ok(self)
    }
}

impl CurrencyTable for CustomCurrencyTable {
    fn exponent(&self, code: &str) -> Option<u8> {
        self.overrides
            .get(code)
            .copied()
            .or_else(|| Iso4217.exponent(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_table_is_sorted() {
        assert!(ISO_4217.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_lookup_exponents() {
        assert_eq!(Iso4217.lookup("CHF").unwrap().exponent(), 2);
        assert_eq!(Iso4217.lookup("JPY").unwrap().exponent(), 0);
        assert_eq!(Iso4217.lookup("KWD").unwrap().exponent(), 3);
        assert_eq!(Iso4217.lookup("EUR").unwrap().code(), "EUR");
    }

    #[test]
    fn test_lookup_rejects_unknown_and_malformed() {
        assert_eq!(
            Iso4217.lookup("XYZ"),
            Err(Error::UnknownCurrency("XYZ".to_string()))
        );
        assert!(matches!(
            Iso4217.lookup("chf"),
            Err(Error::InvalidCurrencyCode(_))
        ));
        assert!(matches!(
            Iso4217.lookup("CHFX"),
            Err(Error::InvalidCurrencyCode(_))
        ));
    }

    #[test]
    fn test_currency_new_rejects_large_exponent() {
        assert!(Currency::new("ABC", 5).is_err());
        assert!(Currency::new("ABC", 4).is_ok());
    }

    #[test]
    fn test_deserialize_goes_through_constructor() {
        let chf: Currency = toml::from_str("code = \"CHF\"\nexponent = 2").unwrap();
        assert_eq!(chf, Iso4217.lookup("CHF").unwrap());

        assert!(toml::from_str::<Currency>("code = \"chf\"\nexponent = 2").is_err());
        assert!(toml::from_str::<Currency>("code = \"CHF\"\nexponent = 40").is_err());
    }

    #[test]
    fn test_serialize_code_as_string() {
        let text = toml::to_string(&Iso4217.lookup("KWD").unwrap()).unwrap();
        assert!(text.contains("code = \"KWD\""));
        assert!(text.contains("exponent = 3"));
    }

    #[test]
    fn test_custom_table_overlays_iso() {
        let table = CustomCurrencyTable::new()
            .with_currency("XBT", 3)
            .unwrap()
            .with_currency("JPY", 2)
            .unwrap();

        assert_eq!(table.exponent("XBT"), Some(3));
        assert_eq!(table.exponent("JPY"), Some(2));
        assert_eq!(table.exponent("CHF"), Some(2));
        assert!(!table.is_known("XYZ"));
    }
}
