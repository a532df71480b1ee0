//! Error types for money arithmetic

use thiserror::Error;

/// Result type for money operations
pub type Result<T> = std::result::Result<T, Error>;

/// Money errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Arithmetic or comparison between two different currencies
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand
        left: String,
        /// Currency of the right operand
        right: String,
    },

    /// Code is well formed but not present in the currency table
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Code is not three upper-case ASCII letters, or the exponent is out of range
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Amount cannot be represented in the currency's minor unit
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Minor-unit arithmetic overflowed
    #[error("Amount overflow")]
    Overflow,
}
