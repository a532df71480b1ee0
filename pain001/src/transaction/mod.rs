//! Credit transfer transactions (`CdtTrfTxInf`)
//!
//! # Variants
//!
//! | type | currencies | fixed code | account |
//! |------|------------|------------|---------|
//! | [`Is1CreditTransfer`] | CHF, EUR | `CH01` local instrument | postal account |
//! | [`Is2CreditTransfer`] | CHF, EUR | `CH02` local instrument | IBAN + bank's postal account |
//! | [`BankCreditTransfer`] | any | - | IBAN + agent (BIC or IID) |
//! | [`SepaCreditTransfer`] | EUR | `SEPA` service level | IBAN + BIC agent |
//!
//! All of them are also reachable through the closed [`CreditTransfer`] enum.
//!
//! # Lifecycle
//!
//! `new` validates every field and the variant rules; a failing constructor
//! leaves nothing behind. Optional fields are then set through the
//! validating `with_*` methods of [`CreditTransferInformation`]. Rendering
//! takes the enclosing payment information as a parameter and never
//! changes the transaction.
//!
//! # Fragment order
//!
//! ```text
//! CdtTrfTxInf
//!   PmtId         header (always)
//!   PmtTpInf      header (only if the payment information has none)
//!   Amt           header (always)
//!   CdtrAgt       variant
//!   Cdtr          creditor (always)
//!   CdtrAcct      variant
//!   Purp          optional
//!   RmtInf        optional, skipped when blank
//! ```

mod bank;
mod blocks;
mod is1;
mod is2;
mod sepa;

pub use bank::BankCreditTransfer;
pub use is1::Is1CreditTransfer;
pub use is2::Is2CreditTransfer;
pub use sepa::SepaCreditTransfer;

use crate::{
    address::PostalAddress,
    context::PaymentContext,
    fragment::Element,
    identifiers::PurposeCode,
    text::{
        assert_identifier, assert_required_text, assert_text, Identifier, Text, MAX_CODE_LENGTH,
        MAX_NAME_LENGTH, MAX_REMITTANCE_LENGTH,
    },
    Error, Result,
};
use money_core::Money;
use std::sync::Arc;

/// Creditor name and optional address
#[derive(Debug, Clone)]
pub struct Creditor {
    name: Text,
    address: Option<Arc<dyn PostalAddress>>,
}

impl Creditor {
    /// Creditor without address; the name must not be blank
    pub fn new(name: &str) -> Result<Self> {
        let name = assert_required_text(name, MAX_NAME_LENGTH)
            .map_err(|e| e.in_field("creditor_name"))?;
        Ok(Self {
            name,
            address: None,
        })
    }

    /// Attach a postal address
    #[must_use]
    pub fn with_address(mut self, address: impl PostalAddress + 'static) -> Self {
        self.address = Some(Arc::new(address));
        self
    }

    /// Name
    pub fn name(&self) -> &Text {
        &self.name
    }

    /// Address, if any
    pub fn address(&self) -> Option<&dyn PostalAddress> {
        self.address.as_deref()
    }
}

/// Local instrument or service level code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCode {
    /// Dictated by the transaction type; caller input is ignored
    Fixed(&'static str),
    /// Chosen by the caller, if at all
    Open(Option<Text>),
}

impl PaymentCode {
    /// Effective code
    pub fn value(&self) -> Option<&str> {
        match self {
            PaymentCode::Fixed(code) => Some(code),
            PaymentCode::Open(code) => code.as_ref().map(Text::as_str),
        }
    }

    fn set(&mut self, field: &str, code: &str) -> Result<()> {
        match self {
            PaymentCode::Fixed(fixed) => {
                tracing::debug!(
                    field,
                    fixed = *fixed,
                    ignored = code,
                    "Ignoring override of fixed code"
                );
            }
            PaymentCode::Open(current) => {
                let text = assert_text(code, MAX_CODE_LENGTH).map_err(|e| e.in_field(field))?;
                *current = Some(text);
            }
        }
        Ok(())
    }
}

/// Fields shared by every credit transfer
#[derive(Debug, Clone)]
pub struct TransactionCore {
    instruction_id: Identifier,
    end_to_end_id: Identifier,
    amount: Money,
    creditor: Creditor,
    local_instrument: PaymentCode,
    service_level: PaymentCode,
    purpose: Option<PurposeCode>,
    remittance_information: Option<Text>,
}

impl TransactionCore {
    fn new(
        instruction_id: &str,
        end_to_end_id: &str,
        amount: Money,
        creditor: Creditor,
        local_instrument: PaymentCode,
        service_level: PaymentCode,
    ) -> Result<Self> {
        Ok(Self {
            instruction_id: assert_identifier(instruction_id)
                .map_err(|e| e.in_field("instruction_id"))?,
            end_to_end_id: assert_identifier(end_to_end_id)
                .map_err(|e| e.in_field("end_to_end_id"))?,
            amount,
            creditor,
            local_instrument,
            service_level,
            purpose: None,
            remittance_information: None,
        })
    }

    /// Instruction identification (`InstrId`)
    pub fn instruction_id(&self) -> &Identifier {
        &self.instruction_id
    }

    /// End-to-end identification (`EndToEndId`)
    pub fn end_to_end_id(&self) -> &Identifier {
        &self.end_to_end_id
    }

    /// Instructed amount
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    /// Creditor
    pub fn creditor(&self) -> &Creditor {
        &self.creditor
    }

    /// Effective local instrument code
    pub fn local_instrument(&self) -> Option<&str> {
        self.local_instrument.value()
    }

    /// Effective service level code
    pub fn service_level(&self) -> Option<&str> {
        self.service_level.value()
    }

    /// Purpose code
    pub fn purpose(&self) -> Option<&PurposeCode> {
        self.purpose.as_ref()
    }

    /// Unstructured remittance information
    pub fn remittance_information(&self) -> Option<&Text> {
        self.remittance_information.as_ref()
    }
}

/// Optional fields in one bundle, applied with
/// [`CreditTransferInformation::with_options`]
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// Local instrument proprietary code
    pub local_instrument: Option<String>,
    /// Service level code
    pub service_level: Option<String>,
    /// Purpose code
    pub purpose: Option<PurposeCode>,
    /// Unstructured remittance information
    pub remittance_information: Option<String>,
}

mod sealed {
    use super::TransactionCore;

    /// Write access to the shared fields, limited to this module tree
    pub trait Sealed {
        fn core_mut(&mut self, token: Token) -> &mut TransactionCore;
    }

    /// Only constructible inside `transaction`
    #[derive(Debug, Clone, Copy)]
    pub struct Token(pub(super) ());
}

use sealed::{Sealed, Token};

/// Behaviour shared by all credit transfer types
///
/// The shared fields are read-only from outside the crate; only the
/// validating `with_*` methods change them.
///
/// ```compile_fail
/// use pain001::CreditTransferInformation;
///
/// fn overwrite<T: CreditTransferInformation>(target: &mut T, source: &T) {
///     *target.core_mut() = source.core().clone();
/// }
/// ```
pub trait CreditTransferInformation: Sealed + Sized {
    /// Name of the transaction type, used in errors and logs
    fn variant(&self) -> &'static str;

    /// Shared fields
    fn core(&self) -> &TransactionCore;

    /// Check the type-specific currency, account and agent rules
    fn validate(&self) -> Result<()>;

    /// Render the `CdtTrfTxInf` fragment inside `context`
    fn render(&self, context: &dyn PaymentContext) -> Element;

    /// Set the local instrument (ignored where the type fixes it)
    fn with_local_instrument(mut self, code: &str) -> Result<Self> {
        self.core_mut(Token(())).local_instrument.set("local_instrument", code)?;
        Ok(self)
    }

    /// Set the service level (ignored where the type fixes it)
    fn with_service_level(mut self, code: &str) -> Result<Self> {
        self.core_mut(Token(())).service_level.set("service_level", code)?;
        Ok(self)
    }

    /// Set the purpose
    #[must_use]
    fn with_purpose(mut self, purpose: PurposeCode) -> Self {
        self.core_mut(Token(())).purpose = Some(purpose);
        self
    }

    /// Set unstructured remittance information (max 140 characters);
    /// blank text clears it
    fn with_remittance_information(mut self, text: &str) -> Result<Self> {
        let text = if text.trim().is_empty() {
            None
        } else {
            Some(
                assert_text(text, MAX_REMITTANCE_LENGTH)
                    .map_err(|e| e.in_field("remittance_information"))?,
            )
        };
        self.core_mut(Token(())).remittance_information = text;
        Ok(self)
    }

    /// Apply every field set in `options`
    fn with_options(self, options: TransactionOptions) -> Result<Self> {
        let mut transaction = self;
        if let Some(code) = &options.local_instrument {
            transaction = transaction.with_local_instrument(code)?;
        }
        if let Some(code) = &options.service_level {
            transaction = transaction.with_service_level(code)?;
        }
        if let Some(purpose) = options.purpose {
            transaction = transaction.with_purpose(purpose);
        }
        if let Some(text) = &options.remittance_information {
            transaction = transaction.with_remittance_information(text)?;
        }
        Ok(transaction)
    }
}

/// Reject amounts whose currency is not in `allowed`
fn ensure_currency(variant: &'static str, amount: &Money, allowed: &[&str]) -> Result<()> {
    let currency = amount.currency();
    if allowed.contains(&currency.code()) {
        return Ok(());
    }

    tracing::warn!(variant, currency = %currency, "Rejected transaction currency");
    Err(Error::UnsupportedCurrency {
        variant,
        currency: currency.code().to_string(),
        allowed: allowed.join(", "),
    })
}

/// Any credit transfer type
#[derive(Debug, Clone)]
pub enum CreditTransfer {
    /// Orange inpayment slip (postal account)
    Is1(Is1CreditTransfer),
    /// Red inpayment slip (bank account via postal account)
    Is2(Is2CreditTransfer),
    /// Domestic or foreign bank transfer
    Bank(BankCreditTransfer),
    /// SEPA transfer
    Sepa(SepaCreditTransfer),
}

impl CreditTransferInformation for CreditTransfer {
    fn variant(&self) -> &'static str {
        match self {
            CreditTransfer::Is1(t) => t.variant(),
            CreditTransfer::Is2(t) => t.variant(),
            CreditTransfer::Bank(t) => t.variant(),
            CreditTransfer::Sepa(t) => t.variant(),
        }
    }

    fn core(&self) -> &TransactionCore {
        match self {
            CreditTransfer::Is1(t) => t.core(),
            CreditTransfer::Is2(t) => t.core(),
            CreditTransfer::Bank(t) => t.core(),
            CreditTransfer::Sepa(t) => t.core(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            CreditTransfer::Is1(t) => t.validate(),
            CreditTransfer::Is2(t) => t.validate(),
            CreditTransfer::Bank(t) => t.validate(),
            CreditTransfer::Sepa(t) => t.validate(),
        }
    }

    fn render(&self, context: &dyn PaymentContext) -> Element {
        match self {
            CreditTransfer::Is1(t) => t.render(context),
            CreditTransfer::Is2(t) => t.render(context),
            CreditTransfer::Bank(t) => t.render(context),
            CreditTransfer::Sepa(t) => t.render(context),
        }
    }
}

impl Sealed for CreditTransfer {
    fn core_mut(&mut self, token: Token) -> &mut TransactionCore {
        match self {
            CreditTransfer::Is1(t) => t.core_mut(token),
            CreditTransfer::Is2(t) => t.core_mut(token),
            CreditTransfer::Bank(t) => t.core_mut(token),
            CreditTransfer::Sepa(t) => t.core_mut(token),
        }
    }
}

impl From<Is1CreditTransfer> for CreditTransfer {
    fn from(transaction: Is1CreditTransfer) -> Self {
        CreditTransfer::Is1(transaction)
    }
}

impl From<Is2CreditTransfer> for CreditTransfer {
    fn from(transaction: Is2CreditTransfer) -> Self {
        CreditTransfer::Is2(transaction)
    }
}

impl From<BankCreditTransfer> for CreditTransfer {
    fn from(transaction: BankCreditTransfer) -> Self {
        CreditTransfer::Bank(transaction)
    }
}

impl From<SepaCreditTransfer> for CreditTransfer {
    fn from(transaction: SepaCreditTransfer) -> Self {
        CreditTransfer::Sepa(transaction)
    }
}
