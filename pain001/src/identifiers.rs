//! Validated account, agent and code identifiers
//!
//! Each type can only be built through its validating constructor and
//! knows how to render itself as a fragment.

use crate::{fragment::Element, Error, Result, ValidationKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IBAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$").expect("valid IBAN regex"));

static BIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("valid BIC regex")
});

static IID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,5}$").expect("valid IID regex"));

static POSTAL_ACCOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})-([0-9]{1,6})-([0-9])$").expect("valid postal account regex")
});

static PURPOSE_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}$").expect("valid purpose code regex"));

/// Clearing system code for Swiss IIDs
const SWISS_CLEARING_SYSTEM: &str = "CHBCC";

/// Table for the recursive modulo 10 check digit of postal accounts
const MOD10_TABLE: [u32; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

fn format_error(field: &str, message: String) -> Error {
    Error::validation(field, ValidationKind::Format(message))
}

// =========================================================================
// IBAN
// =========================================================================

/// International Bank Account Number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iban(String);

impl Iban {
    /// Parse an IBAN; spaces are ignored, letters upper-cased
    pub fn new(value: &str) -> Result<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        if !IBAN_PATTERN.is_match(&normalized) {
            return Err(format_error("iban", format!("malformed IBAN {:?}", value)));
        }
        if mod97(&normalized) != 1 {
            return Err(format_error("iban", format!("checksum mismatch for {}", normalized)));
        }

        Ok(Self(normalized))
    }

    /// Electronic format, no spaces
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO 3166 country code (first two letters)
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Paper format, groups of four
    pub fn format(&self) -> String {
        self.0
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `<IBAN>`
    pub fn render(&self) -> Element {
        Element::text_element("IBAN", self.0.as_str())
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 7064 mod 97-10 over the rearranged IBAN
fn mod97(iban: &str) -> u32 {
    let (head, tail) = iban.split_at(4);
    tail.chars().chain(head.chars()).fold(0, |remainder, c| {
        match c.to_digit(36) {
            Some(value) if value < 10 => (remainder * 10 + value) % 97,
            Some(value) => (remainder * 100 + value) % 97,
            None => remainder,
        }
    })
}

// =========================================================================
// FINANCIAL INSTITUTIONS
// =========================================================================

/// Business Identifier Code (SWIFT)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bic(String);

impl Bic {
    /// Parse a BIC (8 or 11 characters)
    pub fn new(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        if !BIC_PATTERN.is_match(&normalized) {
            return Err(format_error("bic", format!("malformed BIC {:?}", value)));
        }
        Ok(Self(normalized))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Swiss institutional identification (bank clearing number)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iid(u32);

impl Iid {
    /// Parse a 3 to 5 digit clearing number
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if !IID_PATTERN.is_match(trimmed) {
            return Err(format_error("iid", format!("malformed IID {:?}", value)));
        }
        let number = trimmed
            .parse()
            .map_err(|_| format_error("iid", format!("malformed IID {:?}", value)))?;
        Ok(Self(number))
    }

    /// Zero-padded five digit form
    pub fn format(&self) -> String {
        format!("{:05}", self.0)
    }
}

impl fmt::Display for Iid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Bic {}
    impl Sealed for super::Iid {}
    impl Sealed for super::FinancialInstitution {}
}

/// Validated identifier of a financial institution.
///
/// Sealed: only [`Bic`], [`Iid`] and [`FinancialInstitution`] implement it.
pub trait InstitutionIdentifier: sealed::Sealed {
    /// Convert into the closed institution type
    fn into_institution(self) -> FinancialInstitution;
}

/// Financial institution acting as an agent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinancialInstitution {
    /// Identified by BIC
    Bic(Bic),
    /// Identified by Swiss clearing number
    Iid(Iid),
}

impl FinancialInstitution {
    /// BIC, if identified by one
    pub fn bic(&self) -> Option<&Bic> {
        match self {
            FinancialInstitution::Bic(bic) => Some(bic),
            FinancialInstitution::Iid(_) => None,
        }
    }

    /// Short name of the identification scheme
    pub fn scheme(&self) -> &'static str {
        match self {
            FinancialInstitution::Bic(_) => "BIC",
            FinancialInstitution::Iid(_) => "IID",
        }
    }

    /// `<FinInstnId>`
    pub fn render(&self) -> Element {
        let identification = match self {
            FinancialInstitution::Bic(bic) => Element::text_element("BIC", bic.as_str()),
            FinancialInstitution::Iid(iid) => Element::new("ClrSysMmbId")
                .with_child(
                    Element::new("ClrSysId")
                        .with_child(Element::text_element("Cd", SWISS_CLEARING_SYSTEM)),
                )
                .with_child(Element::text_element("MmbId", iid.format())),
        };
        Element::new("FinInstnId").with_child(identification)
    }
}

impl fmt::Display for FinancialInstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinancialInstitution::Bic(bic) => write!(f, "BIC {}", bic),
            FinancialInstitution::Iid(iid) => write!(f, "IID {}", iid),
        }
    }
}

impl InstitutionIdentifier for Bic {
    fn into_institution(self) -> FinancialInstitution {
        FinancialInstitution::Bic(self)
    }
}

impl InstitutionIdentifier for Iid {
    fn into_institution(self) -> FinancialInstitution {
        FinancialInstitution::Iid(self)
    }
}

impl InstitutionIdentifier for FinancialInstitution {
    fn into_institution(self) -> FinancialInstitution {
        self
    }
}

// =========================================================================
// POSTAL ACCOUNT
// =========================================================================

/// Swiss postal account (`NN-NNNNNN-C`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalAccount {
    prefix: u32,
    number: u32,
    check_digit: u32,
}

impl PostalAccount {
    /// Parse and verify the check digit
    pub fn new(value: &str) -> Result<Self> {
        let malformed =
            || format_error("postal_account", format!("malformed postal account {:?}", value));
        let captures = POSTAL_ACCOUNT_PATTERN
            .captures(value.trim())
            .ok_or_else(malformed)?;

        let digits = |idx: usize| -> Result<u32> { captures[idx].parse().map_err(|_| malformed()) };
        let prefix = digits(1)?;
        let number = digits(2)?;
        let check_digit = digits(3)?;

        if number == 0 {
            return Err(format_error(
                "postal_account",
                format!("empty account number in {:?}", value),
            ));
        }

        let expected = postal_check_digit(&format!("{:02}{:06}", prefix, number));
        if expected != check_digit {
            return Err(format_error(
                "postal_account",
                format!("check digit of {:?} should be {}", value, expected),
            ));
        }

        Ok(Self {
            prefix,
            number,
            check_digit,
        })
    }

    /// Canonical form without leading zeros in the account number
    pub fn format(&self) -> String {
        format!("{:02}-{}-{}", self.prefix, self.number, self.check_digit)
    }

    /// `<Othr><Id>..</Id></Othr>`
    pub fn render(&self) -> Element {
        Element::new("Othr").with_child(Element::text_element("Id", self.format()))
    }
}

impl fmt::Display for PostalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

fn postal_check_digit(digits: &str) -> u32 {
    let carry = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |carry, digit| MOD10_TABLE[((carry + digit) % 10) as usize]);
    (10 - carry) % 10
}

// =========================================================================
// PURPOSE
// =========================================================================

/// ISO 20022 external purpose code (e.g. `SALA`, `PENS`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurposeCode(String);

impl PurposeCode {
    /// Parse a four letter code
    pub fn new(value: &str) -> Result<Self> {
        if !PURPOSE_CODE_PATTERN.is_match(value) {
            return Err(format_error("purpose", format!("malformed purpose code {:?}", value)));
        }
        Ok(Self(value.to_string()))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<Cd>`
    pub fn render(&self) -> Element {
        Element::text_element("Cd", self.0.as_str())
    }
}
