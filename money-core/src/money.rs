//! Currency-tagged exact amounts

use crate::{Currency, Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Exact monetary amount in integer minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    currency: Currency,
    minor_units: i64,
}

impl Money {
    /// Create an amount from minor units (cents, rappen, yen, ...)
    pub fn of(currency: Currency, minor_units: i64) -> Self {
        Self {
            currency,
            minor_units,
        }
    }

    /// Create an amount from a decimal value in major units.
    ///
    /// Fails if the value has more fractional digits than the currency
    /// allows, or does not fit into minor units.
    pub fn from_decimal(currency: Currency, value: Decimal) -> Result<Self> {
        let exponent = u32::from(currency.exponent());
        let mut value = value.normalize();
        if value.scale() > exponent {
            return Err(Error::InvalidAmount(format!(
                "{} has more than {} fractional digits for {}",
                value, exponent, currency
            )));
        }
        value.rescale(exponent);

        let minor_units = i64::try_from(value.mantissa()).map_err(|_| Error::Overflow)?;
        Ok(Self::of(currency, minor_units))
    }

    /// Currency of this amount
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount in minor units
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Amount in major units, scaled to the currency exponent
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.minor_units, u32::from(self.currency.exponent()))
    }

    /// Sum of two amounts in the same currency
    pub fn add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let minor_units = self
            .minor_units
            .checked_add(other.minor_units)
            .ok_or(Error::Overflow)?;
        Ok(Self::of(self.currency, minor_units))
    }

    /// Difference of two amounts in the same currency
    pub fn subtract(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let minor_units = self
            .minor_units
            .checked_sub(other.minor_units)
            .ok_or(Error::Overflow)?;
        Ok(Self::of(self.currency, minor_units))
    }

    /// Compare two amounts in the same currency
    pub fn compare(&self, other: &Money) -> Result<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.minor_units.cmp(&other.minor_units))
    }

    /// Amount with the opposite sign
    pub fn negate(&self) -> Result<Money> {
        let minor_units = self.minor_units.checked_neg().ok_or(Error::Overflow)?;
        Ok(Self::of(self.currency, minor_units))
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Fixed-point rendering with the full exponent precision.
    ///
    /// `.` separator, no grouping: `1234.56`, `1200` (JPY), `1.200` (KWD).
    pub fn format(&self) -> String {
        self.as_decimal().to_string()
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(Error::CurrencyMismatch {
                left: self.currency.code().to_string(),
                right: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.format())
    }
}
