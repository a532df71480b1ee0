//! Payment information (`PmtInf`) as seen by its transactions
//!
//! A transaction only needs to know whether the enclosing payment
//! information already declares payment type information. That question is
//! the whole of [`PaymentContext`]; [`PaymentInformation`] is the standard
//! implementation and also groups transactions for control sums.

use crate::{
    fragment::Element,
    text::{assert_identifier, assert_text, Identifier, Text, MAX_CODE_LENGTH},
    transaction::{CreditTransfer, CreditTransferInformation},
    Result,
};
use money_core::{Currency, MixedAccumulator};

/// What a transaction may ask about its enclosing payment information
pub trait PaymentContext {
    /// `true` if the payment information carries its own `PmtTpInf`
    fn has_payment_type_information(&self) -> bool;
}

/// Group of credit transfers sharing one debtor side
#[derive(Debug, Clone)]
pub struct PaymentInformation {
    id: Identifier,
    service_level: Option<Text>,
    local_instrument: Option<Text>,
    category_purpose: Option<Text>,
    transactions: Vec<CreditTransfer>,
}

impl PaymentInformation {
    /// Empty payment information identified by `id` (`PmtInfId`)
    pub fn new(id: &str) -> Result<Self> {
        Ok(Self {
            id: assert_identifier(id).map_err(|e| e.in_field("payment_information_id"))?,
            service_level: None,
            local_instrument: None,
            category_purpose: None,
            transactions: Vec::new(),
        })
    }

    /// Declare a service level for every transaction
    pub fn with_service_level(mut self, code: &str) -> Result<Self> {
        self.service_level =
            Some(assert_text(code, MAX_CODE_LENGTH).map_err(|e| e.in_field("service_level"))?);
        Ok(self)
    }

    /// Declare a local instrument for every transaction
    pub fn with_local_instrument(mut self, code: &str) -> Result<Self> {
        self.local_instrument =
            Some(assert_text(code, MAX_CODE_LENGTH).map_err(|e| e.in_field("local_instrument"))?);
        Ok(self)
    }

    /// Declare a category purpose for every transaction
    pub fn with_category_purpose(mut self, code: &str) -> Result<Self> {
        self.category_purpose =
            Some(assert_text(code, MAX_CODE_LENGTH).map_err(|e| e.in_field("category_purpose"))?);
        Ok(self)
    }

    /// Append a transaction
    pub fn add_transaction(&mut self, transaction: impl Into<CreditTransfer>) {
        let transaction = transaction.into();
        tracing::debug!(
            payment_information = %self.id,
            variant = transaction.variant(),
            instruction_id = %transaction.core().instruction_id(),
            "Transaction added"
        );
        self.transactions.push(transaction);
    }

    /// Identifier
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Service level, if declared
    pub fn service_level(&self) -> Option<&str> {
        self.service_level.as_ref().map(Text::as_str)
    }

    /// Local instrument, if declared
    pub fn local_instrument(&self) -> Option<&str> {
        self.local_instrument.as_ref().map(Text::as_str)
    }

    /// Category purpose, if declared
    pub fn category_purpose(&self) -> Option<&str> {
        self.category_purpose.as_ref().map(Text::as_str)
    }

    /// Transactions in insertion order
    pub fn transactions(&self) -> &[CreditTransfer] {
        &self.transactions
    }

    /// `NbOfTxs`
    pub fn number_of_transactions(&self) -> usize {
        self.transactions.len()
    }

    /// `CtrlSum`: face values of all transactions, whatever their currency
    pub fn control_sum(&self, reference: Currency) -> MixedAccumulator {
        self.transactions
            .iter()
            .fold(MixedAccumulator::new(0, reference), |sum, transaction| {
                sum.plus(transaction.core().amount())
            })
    }

    /// One `CdtTrfTxInf` per transaction, rendered in this context
    pub fn render_transactions(&self) -> Vec<Element> {
        tracing::trace!(
            payment_information = %self.id,
            count = self.transactions.len(),
            "Rendering transactions"
        );
        self.transactions
            .iter()
            .map(|transaction| transaction.render(self))
            .collect()
    }
}

impl PaymentContext for PaymentInformation {
    fn has_payment_type_information(&self) -> bool {
        self.service_level.is_some()
            || self.local_instrument.is_some()
            || self.category_purpose.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{Bic, Iban, PostalAccount};
    use crate::transaction::test_support::{creditor, money};
    use crate::transaction::{BankCreditTransfer, Is1CreditTransfer};

    fn is1(id: &str, minor_units: i64) -> Is1CreditTransfer {
        Is1CreditTransfer::new(
            id,
            id,
            money("CHF", minor_units),
            creditor(),
            PostalAccount::new("80-5928-4").unwrap(),
        )
        .unwrap()
    }

    fn bank(id: &str, code: &str, minor_units: i64) -> BankCreditTransfer {
        BankCreditTransfer::new(
            id,
            id,
            money(code, minor_units),
            creditor(),
            Bic::new("DEUTDEFF").unwrap(),
            Iban::new("DE89370400440532013000").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_payment_type_information_flag() {
        let plain = PaymentInformation::new("pmt-1").unwrap();
        assert!(!plain.has_payment_type_information());

        let with_level = PaymentInformation::new("pmt-2")
            .unwrap()
            .with_service_level("SEPA")
            .unwrap();
        assert!(with_level.has_payment_type_information());

        let with_purpose = PaymentInformation::new("pmt-3")
            .unwrap()
            .with_category_purpose("SALA")
            .unwrap();
        assert!(with_purpose.has_payment_type_information());
    }

    #[test]
    fn test_rejects_invalid_id() {
        assert!(PaymentInformation::new("").is_err());
        assert!(PaymentInformation::new("pmt 1").is_err());
    }

    #[test]
    fn test_control_sum_across_currencies() {
        let mut payment = PaymentInformation::new("pmt-1").unwrap();
        payment.add_transaction(is1("a", 2456));
        payment.add_transaction(bank("b", "CHF", 1000));
        payment.add_transaction(bank("c", "JPY", 1200));

        assert_eq!(payment.number_of_transactions(), 3);
        let chf = money("CHF", 0).currency();
        assert_eq!(payment.control_sum(chf).format(), "1234.56");
    }

    #[test]
    fn test_empty_control_sum() {
        let payment = PaymentInformation::new("pmt-1").unwrap();
        let chf = money("CHF", 0).currency();
        assert_eq!(payment.control_sum(chf).format(), "0.00");
    }

    #[test]
    fn test_render_transactions_respects_context() {
        let mut payment = PaymentInformation::new("pmt-1")
            .unwrap()
            .with_local_instrument("CH01")
            .unwrap();
        payment.add_transaction(is1("a", 100));
        payment.add_transaction(is1("b", 200));

        let fragments = payment.render_transactions();
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().all(|f| f.child("PmtTpInf").is_none()));
        assert_eq!(fragments[1].find(&["PmtId", "InstrId"]).unwrap().text(), "b");
    }
}
