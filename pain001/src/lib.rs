//! pain.001 credit transfer transactions
//!
//! Builds the `CdtTrfTxInf` part of ISO 20022 pain.001 customer credit
//! transfer initiations for the Swiss payment types.
//!
//! # Architecture
//!
//! - **Values**: [`Iban`], [`Bic`], [`Iid`], [`PostalAccount`],
//!   [`PurposeCode`] and the text newtypes are validated on construction
//! - **Transactions**: one type per payment variant ([`Is1CreditTransfer`],
//!   [`Is2CreditTransfer`], [`BankCreditTransfer`], [`SepaCreditTransfer`]),
//!   unified by [`CreditTransferInformation`] and the [`CreditTransfer`] enum
//! - **Context**: [`PaymentInformation`] groups transactions, computes the
//!   control sum and decides whether `PmtTpInf` moves up a level
//! - **Fragments**: rendering yields an [`Element`] tree, serialized with
//!   `quick-xml`
//!
//! # Invariants
//!
//! - A constructed transaction satisfies all rules of its variant
//! - Rendering is pure and deterministic
//! - Fixed codes (`CH01`, `CH02`, `SEPA`) cannot be overridden
//!
//! # Example
//!
//! ```
//! use money_core::{CurrencyTable, Iso4217, Money};
//! use pain001::{
//!     Creditor, CreditTransferInformation, Is1CreditTransfer, PaymentInformation,
//!     PostalAccount, XmlConfig,
//! };
//!
//! let chf = Iso4217.lookup("CHF")?;
//! let transaction = Is1CreditTransfer::new(
//!     "instr-001",
//!     "e2e-001",
//!     Money::of(chf, 13000),
//!     Creditor::new("Muster AG")?,
//!     PostalAccount::new("80-5928-4")?,
//! )?
//! .with_remittance_information("Invoice 42")?;
//!
//! let mut payment = PaymentInformation::new("pmt-001")?;
//! payment.add_transaction(transaction);
//! assert_eq!(payment.control_sum(chf).format(), "130.00");
//!
//! let xml = payment.render_transactions()[0].to_xml(&XmlConfig::default())?;
//! assert!(xml.contains("CH01"));
//! # Ok::<(), pain001::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod address;
pub mod config;
pub mod context;
pub mod error;
pub mod fragment;
pub mod identifiers;
pub mod text;
pub mod transaction;

// Re-exports
pub use address::{PostalAddress, StructuredPostalAddress, UnstructuredPostalAddress};
pub use config::{Config, CurrencyOverride, XmlConfig};
pub use context::{PaymentContext, PaymentInformation};
pub use error::{Error, Result, ValidationKind};
pub use fragment::{Element, Node};
pub use identifiers::{
    Bic, FinancialInstitution, Iban, Iid, InstitutionIdentifier, PostalAccount, PurposeCode,
};
pub use text::{
    assert_identifier, assert_optional_text, assert_required_text, assert_text, Identifier, Text,
};
pub use transaction::{
    BankCreditTransfer, CreditTransfer, CreditTransferInformation, Creditor, Is1CreditTransfer,
    Is2CreditTransfer, PaymentCode, SepaCreditTransfer, TransactionCore, TransactionOptions,
};
