//! Bank transfer to an IBAN, agent identified by BIC or Swiss IID

use super::{
    blocks, Creditor, CreditTransferInformation, PaymentCode, Sealed, Token, TransactionCore,
};
use crate::{
    context::PaymentContext,
    fragment::Element,
    identifiers::{FinancialInstitution, Iban, InstitutionIdentifier},
    Error, Result,
};
use money_core::Money;

const VARIANT: &str = "Bank";

/// Clearing numbers only route within the Swiss clearing system
const IID_COUNTRIES: &[&str] = &["CH", "LI"];

/// Credit transfer to a bank account
#[derive(Debug, Clone)]
pub struct BankCreditTransfer {
    core: TransactionCore,
    creditor_agent: FinancialInstitution,
    creditor_account: Iban,
}

impl BankCreditTransfer {
    /// Create a bank transfer in any currency
    pub fn new(
        instruction_id: &str,
        end_to_end_id: &str,
        amount: Money,
        creditor: Creditor,
        creditor_agent: impl InstitutionIdentifier,
        creditor_account: Iban,
    ) -> Result<Self> {
        let transaction = Self {
            core: TransactionCore::new(
                instruction_id,
                end_to_end_id,
                amount,
                creditor,
                PaymentCode::Open(None),
                PaymentCode::Open(None),
            )?,
            creditor_agent: creditor_agent.into_institution(),
            creditor_account,
        };
        transaction.validate()?;

        tracing::debug!(
            variant = VARIANT,
            instruction_id = %transaction.core.instruction_id,
            amount = %transaction.core.amount,
            agent = %transaction.creditor_agent,
            "Credit transfer created"
        );
        Ok(transaction)
    }

    /// Creditor agent
    pub fn creditor_agent(&self) -> &FinancialInstitution {
        &self.creditor_agent
    }

    /// Creditor IBAN
    pub fn creditor_account(&self) -> &Iban {
        &self.creditor_account
    }
}

impl Sealed for BankCreditTransfer {
    fn core_mut(&mut self, _: Token) -> &mut TransactionCore {
        &mut self.core
    }
}

impl CreditTransferInformation for BankCreditTransfer {
    fn variant(&self) -> &'static str {
        VARIANT
    }

    fn core(&self) -> &TransactionCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if let FinancialInstitution::Iid(iid) = &self.creditor_agent {
            let country = self.creditor_account.country_code();
            if !IID_COUNTRIES.contains(&country) {
                tracing::warn!(variant = VARIANT, %iid, country, "Rejected IID agent");
                return Err(Error::IncompatibleCapability(format!(
                    "IID {} cannot identify the agent of a {} IBAN, use a BIC",
                    iid, country
                )));
            }
        }
        Ok(())
    }

    fn render(&self, context: &dyn PaymentContext) -> Element {
        tracing::trace!(variant = VARIANT, instruction_id = %self.core.instruction_id, "Rendering");

        let mut root = blocks::header(&self.core, context);
        root.push(blocks::creditor_agent(&self.creditor_agent));
        root.push(blocks::creditor(&self.core));
        root.push(blocks::creditor_account(self.creditor_account.render()));
        blocks::append_purpose(&mut root, &self.core);
        blocks::append_remittance_information(&mut root, &self.core);
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{Bic, Iid};
    use crate::transaction::test_support::*;

    #[test]
    fn test_any_currency() {
        for code in ["CHF", "USD", "JPY", "GBP"] {
            let transaction = BankCreditTransfer::new(
                "i",
                "e",
                money(code, 100),
                creditor(),
                Bic::new("DEUTDEFF").unwrap(),
                Iban::new("DE89370400440532013000").unwrap(),
            );
            assert!(transaction.is_ok());
        }
    }

    #[test]
    fn test_iid_agent_with_swiss_iban() {
        let transaction = BankCreditTransfer::new(
            "i",
            "e",
            money("CHF", 100),
            creditor(),
            Iid::new("762").unwrap(),
            Iban::new("CH9300762011623852957").unwrap(),
        )
        .unwrap();

        let fragment = transaction.render(&FixedContext(true));
        assert_eq!(
            fragment
                .find(&["CdtrAgt", "FinInstnId", "ClrSysMmbId", "MmbId"])
                .unwrap()
                .text(),
            "00762"
        );
    }

    #[test]
    fn test_iid_agent_with_foreign_iban_is_incompatible() {
        let result = BankCreditTransfer::new(
            "i",
            "e",
            money("EUR", 100),
            creditor(),
            Iid::new("762").unwrap(),
            Iban::new("DE89370400440532013000").unwrap(),
        );
        assert!(matches!(result, Err(Error::IncompatibleCapability(_))));
    }

    #[test]
    fn test_render_order() {
        let fragment = BankCreditTransfer::new(
            "i",
            "e",
            money("USD", 123456),
            creditor(),
            Bic::new("DEUTDEFF").unwrap(),
            Iban::new("DE89370400440532013000").unwrap(),
        )
        .unwrap()
        .render(&FixedContext(false));

        // No codes set, so no PmtTpInf
        assert_eq!(
            fragment.child_names(),
            vec!["PmtId", "Amt", "CdtrAgt", "Cdtr", "CdtrAcct"]
        );
        let amount = fragment.find(&["Amt", "InstdAmt"]).unwrap();
        assert_eq!(amount.text(), "1234.56");
        assert_eq!(amount.attribute("Ccy"), Some("USD"));
        assert_eq!(
            fragment.find(&["CdtrAgt", "FinInstnId", "BIC"]).unwrap().text(),
            "DEUTDEFF"
        );
    }
}
