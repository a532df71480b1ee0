//! Text and identifier validation
//!
//! Every free-text or identifier field of a transaction goes through one of
//! these functions. [`Identifier`] and [`Text`] can only be obtained here,
//! so holding one proves the value was checked.

use crate::{Error, Result, ValidationKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Max35Text identifiers (InstrId, EndToEndId, ...)
pub const MAX_IDENTIFIER_LENGTH: usize = 35;

/// Party and agent names
pub const MAX_NAME_LENGTH: usize = 70;

/// Unstructured remittance information
pub const MAX_REMITTANCE_LENGTH: usize = 140;

/// Proprietary codes (local instrument, service level)
pub const MAX_CODE_LENGTH: usize = 35;

/// Anything outside the SWIFT-safe identifier set: letters, digits, `/-?:().,'+`
static INVALID_IDENTIFIER_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9/\-?:().,'+]").expect("valid identifier regex"));

/// Validated identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated free text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text(String);

impl Text {
    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate an identifier: 1 to 35 characters from the permitted set
pub fn assert_identifier(value: &str) -> Result<Identifier> {
    if value.is_empty() {
        return Err(Error::validation("identifier", ValidationKind::Empty));
    }
    check_length("identifier", value, MAX_IDENTIFIER_LENGTH)?;

    let found: String = INVALID_IDENTIFIER_CHAR
        .find_iter(value)
        .map(|m| m.as_str())
        .collect();
    if !found.is_empty() {
        return Err(Error::validation(
            "identifier",
            ValidationKind::InvalidCharacters { found },
        ));
    }

    Ok(Identifier(value.to_string()))
}

/// Validate free text of at most `max_length` characters
pub fn assert_text(value: &str, max_length: usize) -> Result<Text> {
    check_length("text", value, max_length)?;

    let found: String = value.chars().filter(|c| c.is_control()).collect();
    if !found.is_empty() {
        return Err(Error::validation(
            "text",
            ValidationKind::InvalidCharacters { found },
        ));
    }

    Ok(Text(value.to_string()))
}

/// Like [`assert_text`], but blank input is rejected
pub fn assert_required_text(value: &str, max_length: usize) -> Result<Text> {
    if value.trim().is_empty() {
        return Err(Error::validation("text", ValidationKind::Empty));
    }
    assert_text(value, max_length)
}

/// Like [`assert_text`]; an absent value passes through unchecked
pub fn assert_optional_text(value: Option<&str>, max_length: usize) -> Result<Option<Text>> {
    value.map(|v| assert_text(v, max_length)).transpose()
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(Error::validation(
            field,
            ValidationKind::TooLong { max, actual },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_accepts_permitted_characters() {
        let longest = "X".repeat(35);
        for id in ["e2e-001", "INSTR/2024-11", "A(1).B,C'D+E?F:G", longest.as_str()] {
            let identifier = assert_identifier(id).unwrap();
            assert_eq!(identifier.as_str(), id);
        }
    }

    #[test]
    fn test_identifier_rejects_empty() {
        let err = assert_identifier("").unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::Empty));
    }

    #[test]
    fn test_identifier_rejects_too_long() {
        let err = assert_identifier(&"X".repeat(36)).unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::TooLong { max: 35, actual: 36 })
        );
    }

    #[test]
    fn test_identifier_rejects_invalid_characters() {
        let err = assert_identifier("pay@ment #1").unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::InvalidCharacters {
                found: "@ #".to_string()
            })
        );
        assert!(assert_identifier("zürich").is_err());
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        let name = "Müller & Söhne AG";
        assert!(assert_text(name, name.chars().count()).is_ok());
        assert!(matches!(
            assert_text(name, 5).unwrap_err().validation_kind(),
            Some(ValidationKind::TooLong { max: 5, .. })
        ));
    }

    #[test]
    fn test_text_rejects_control_characters() {
        assert!(assert_text("line\nbreak", 70).is_err());
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let err = assert_required_text("   ", 70).unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::Empty));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(assert_optional_text(None, 3).unwrap(), None);
        assert_eq!(
            assert_optional_text(Some("abc"), 3).unwrap().unwrap().as_str(),
            "abc"
        );
        assert!(assert_optional_text(Some("abcd"), 3).is_err());
    }

    #[test]
    fn test_in_field_relabels() {
        let err = assert_identifier("").unwrap_err().in_field("end_to_end_id");
        assert!(err.to_string().contains("end_to_end_id"));
    }
}
