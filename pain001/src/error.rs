//! Error types for credit transfer construction and rendering

use thiserror::Error;

/// Result type for pain.001 operations
pub type Result<T> = std::result::Result<T, Error>;

/// pain.001 errors
#[derive(Error, Debug)]
pub enum Error {
    /// Text or identifier field rejected
    #[error("Validation failed for {field}: {kind}")]
    Validation {
        /// Field that failed
        field: String,
        /// Reason
        kind: ValidationKind,
    },

    /// Money error (currency mismatch, unknown currency, ...)
    #[error("Money error: {0}")]
    Money(#[from] money_core::Error),

    /// Amount currency not accepted by the transaction type
    #[error("Unsupported currency {currency} for {variant} (allowed: {allowed})")]
    UnsupportedCurrency {
        /// Transaction type
        variant: &'static str,
        /// Offending currency
        currency: String,
        /// Accepted currencies, comma separated
        allowed: String,
    },

    /// Supplied agent or account does not satisfy what the transaction type requires
    #[error("Incompatible capability: {0}")]
    IncompatibleCapability(String),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a text or identifier was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    /// Required value missing or blank
    #[error("value is empty")]
    Empty,

    /// Longer than the schema allows
    #[error("{actual} characters exceed the maximum of {max}")]
    TooLong {
        /// Maximum length in characters
        max: usize,
        /// Actual length in characters
        actual: usize,
    },

    /// Characters outside the permitted set
    #[error("invalid characters {found:?}")]
    InvalidCharacters {
        /// The rejected characters, in order of appearance
        found: String,
    },

    /// Structure or checksum of an identifier is wrong
    #[error("{0}")]
    Format(String),
}

impl Error {
    /// Validation error for `field`
    pub fn validation(field: impl Into<String>, kind: ValidationKind) -> Self {
        Error::Validation {
            field: field.into(),
            kind,
        }
    }

    /// Re-label a validation error with the field it was raised for
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Error::Validation { kind, .. } => Error::validation(field, kind),
            other => other,
        }
    }

    /// Validation reason, if this is a validation error
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            Error::Validation { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
