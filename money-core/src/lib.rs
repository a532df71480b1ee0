//! Money value model
//!
//! Currency-tagged exact amounts for payment instructions.
//!
//! # Architecture
//!
//! - **Currency table**: minor-unit exponents are looked up through an
//!   injected [`CurrencyTable`] ([`Iso4217`] by default), never a global
//! - **Money**: integer minor units tagged with a [`Currency`]
//! - **Mixed accumulation**: running totals across currencies, joined by
//!   decimal scale only (control sums)
//!
//! # Invariants
//!
//! - Amounts are exact integers of the currency's minor unit
//! - Arithmetic between different currencies fails, except in
//!   [`MixedAccumulator`]
//! - Formatting always shows the full exponent precision with `.`
//!
//! # Example
//!
//! ```
//! use money_core::{CurrencyTable, Iso4217, Money};
//!
//! let chf = Iso4217.lookup("CHF")?;
//! let total = Money::of(chf, 2456).add(&Money::of(chf, 1000))?;
//! assert_eq!(total.format(), "34.56");
//! # Ok::<(), money_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod currency;
pub mod error;
pub mod mixed;
pub mod money;

// Re-exports
pub use currency::{Currency, CurrencyTable, CustomCurrencyTable, Iso4217};
pub use error::{Error, Result};
pub use mixed::MixedAccumulator;
pub use money::Money;
