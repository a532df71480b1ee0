//! Running totals across currencies
//!
//! Used for control sums (`CtrlSum`), where ISO 20022 adds up the face
//! values of all transactions regardless of their currency.
//!
//! # Rebasing
//!
//! An operand is rebased by decimal scale only: its minor units are divided
//! by `10^exponent`, giving its face value, and added to the total. JPY 1200
//! contributes `1200.00` to a CHF-referenced total. No exchange rate is
//! involved.
//!
//! The total keeps the largest scale it has seen, so adding KWD 1.234 to a
//! CHF total switches the rendering to three decimals instead of dropping
//! digits.

use crate::{Currency, Error, Money, Result};
use rust_decimal::Decimal;

/// Append-only total across amounts of different currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedAccumulator {
    total: Decimal,
    reference: Currency,
}

impl MixedAccumulator {
    /// Start a total at `starting_major_units` of the reference currency
    pub fn new(starting_major_units: i64, reference: Currency) -> Self {
        let mut total = Decimal::from(starting_major_units);
        total.rescale(u32::from(reference.exponent()));
        Self { total, reference }
    }

    /// Total with `amount` added
    ///
    /// Clamps at the `Decimal` range (about 7.9e28), which takes billions
    /// of maximal `i64` operands to reach. Use [`checked_plus`] to get an
    /// error instead.
    ///
    /// [`checked_plus`]: MixedAccumulator::checked_plus
    #[must_use]
    pub fn plus(&self, amount: &Money) -> Self {
        Self {
            total: self.total.saturating_add(amount.as_decimal()),
            reference: self.reference,
        }
    }

    /// Total with `amount` subtracted, clamped like [`plus`]
    ///
    /// [`plus`]: MixedAccumulator::plus
    #[must_use]
    pub fn minus(&self, amount: &Money) -> Self {
        Self {
            total: self.total.saturating_sub(amount.as_decimal()),
            reference: self.reference,
        }
    }

    /// Total with `amount` added, `Error::Overflow` outside the `Decimal` range
    pub fn checked_plus(&self, amount: &Money) -> Result<Self> {
        let total = self
            .total
            .checked_add(amount.as_decimal())
            .ok_or(Error::Overflow)?;
        Ok(Self {
            total,
            reference: self.reference,
        })
    }

    /// Total with `amount` subtracted, `Error::Overflow` outside the `Decimal` range
    pub fn checked_minus(&self, amount: &Money) -> Result<Self> {
        let total = self
            .total
            .checked_sub(amount.as_decimal())
            .ok_or(Error::Overflow)?;
        Ok(Self {
            total,
            reference: self.reference,
        })
    }

    /// Reference currency that fixed the starting scale
    pub fn reference(&self) -> Currency {
        self.reference
    }

    /// Current total in major units
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Fixed-point rendering, same rules as [`Money::format`]
    pub fn format(&self) -> String {
        self.total.to_string()
    }
}
