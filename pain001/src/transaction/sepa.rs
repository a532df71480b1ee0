//! SEPA credit transfer: EUR to an IBAN, agent identified by BIC

use super::{
    blocks, ensure_currency, Creditor, CreditTransferInformation, PaymentCode, Sealed, Token,
    TransactionCore,
};
use crate::{
    context::PaymentContext,
    fragment::Element,
    identifiers::{FinancialInstitution, Iban, InstitutionIdentifier},
    Error, Result,
};
use money_core::Money;

const VARIANT: &str = "SEPA";
const SERVICE_LEVEL: &str = "SEPA";
const CURRENCIES: &[&str] = &["EUR"];

/// SEPA credit transfer
#[derive(Debug, Clone)]
pub struct SepaCreditTransfer {
    core: TransactionCore,
    creditor_agent: FinancialInstitution,
    creditor_account: Iban,
}

impl SepaCreditTransfer {
    /// Create a SEPA transfer; EUR only and the agent must be a BIC
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
                PaymentCode::Fixed(SERVICE_LEVEL),
            )?,
            creditor_agent: creditor_agent.into_institution(),
            creditor_account,
        };
        transaction.validate()?;

        tracing::debug!(
            variant = VARIANT,
            instruction_id = %transaction.core.instruction_id,
            amount = %transaction.core.amount,
            "Credit transfer created"
        );
        Ok(transaction)
    }

    /// Creditor agent (always a BIC)
    pub fn creditor_agent(&self) -> &FinancialInstitution {
        &self.creditor_agent
    }

    /// Creditor IBAN
    pub fn creditor_account(&self) -> &Iban {
        &self.creditor_account
    }
}

impl Sealed for SepaCreditTransfer {
    fn core_mut(&mut self, _: Token) -> &mut TransactionCore {
        &mut self.core
    }
}

impl CreditTransferInformation for SepaCreditTransfer {
    fn variant(&self) -> &'static str {
        VARIANT
    }

    fn core(&self) -> &TransactionCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        ensure_currency(VARIANT, &self.core.amount, CURRENCIES)?;

        if self.creditor_agent.bic().is_none() {
            tracing::warn!(
                variant = VARIANT,
                scheme = self.creditor_agent.scheme(),
                "Rejected agent"
            );
            return Err(Error::IncompatibleCapability(format!(
                "{} requires a BIC agent, got {}",
                VARIANT, self.creditor_agent
            )));
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

    fn iban() -> Iban {
        Iban::new("DE89370400440532013000").unwrap()
    }

    #[test]
    fn test_eur_only() {
        let bic = || Bic::new("COBADEFFXXX").unwrap();
        let eur = SepaCreditTransfer::new("i", "e", money("EUR", 1), creditor(), bic(), iban());
        assert!(eur.is_ok());
        assert!(matches!(
            SepaCreditTransfer::new("i", "e", money("CHF", 1), creditor(), bic(), iban()),
            Err(Error::UnsupportedCurrency { .. })
        ));
    }

    #[test]
    fn test_iid_agent_is_incompatible() {
        let result = SepaCreditTransfer::new(
            "i",
            "e",
            money("EUR", 1),
            creditor(),
            Iid::new("762").unwrap(),
            iban(),
        );
        assert!(matches!(result, Err(Error::IncompatibleCapability(_))));
    }

    #[test]
    fn test_service_level_is_fixed() {
        let transaction = SepaCreditTransfer::new(
            "i",
            "e",
            money("EUR", 1),
            creditor(),
            Bic::new("COBADEFFXXX").unwrap(),
            iban(),
        )
        .unwrap()
        .with_service_level("URGP")
        .unwrap();

        let fragment = transaction.render(&FixedContext(false));
        assert_eq!(
            fragment.find(&["PmtTpInf", "SvcLvl", "Cd"]).unwrap().text(),
            "SEPA"
        );
        assert!(fragment.find(&["PmtTpInf", "LclInstrm"]).is_none());
    }
}
