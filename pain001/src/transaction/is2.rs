//! IS2: payment to a bank account through the bank's postal account
//! (red inpayment slip)

use super::{
    blocks, ensure_currency, Creditor, CreditTransferInformation, PaymentCode, Sealed, Token,
    TransactionCore,
};
use crate::{
    context::PaymentContext,
    fragment::Element,
    identifiers::{Iban, PostalAccount},
    text::{assert_required_text, Text, MAX_NAME_LENGTH},
    Error, Result,
};
use money_core::Money;

const VARIANT: &str = "IS2";
const LOCAL_INSTRUMENT: &str = "CH02";
const CURRENCIES: &[&str] = &["CHF", "EUR"];
const IBAN_COUNTRIES: &[&str] = &["CH", "LI"];

/// Credit transfer to a Swiss bank account, routed via postal account
#[derive(Debug, Clone)]
pub struct Is2CreditTransfer {
    core: TransactionCore,
    creditor_account: Iban,
    creditor_agent_name: Text,
    creditor_agent_postal_account: PostalAccount,
}

impl Is2CreditTransfer {
    /// Create an IS2 transfer (CHF or EUR, Swiss or Liechtenstein IBAN)
    pub fn new(
        instruction_id: &str,
        end_to_end_id: &str,
        amount: Money,
        creditor: Creditor,
        creditor_account: Iban,
        creditor_agent_name: &str,
        creditor_agent_postal_account: PostalAccount,
    ) -> Result<Self> {
        let transaction = Self {
            core: TransactionCore::new(
                instruction_id,
                end_to_end_id,
                amount,
                creditor,
                PaymentCode::Fixed(LOCAL_INSTRUMENT),
                PaymentCode::Open(None),
            )?,
            creditor_account,
            creditor_agent_name: assert_required_text(creditor_agent_name, MAX_NAME_LENGTH)
                .map_err(|e| e.in_field("creditor_agent_name"))?,
            creditor_agent_postal_account,
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

    /// Creditor IBAN
    pub fn creditor_account(&self) -> &Iban {
        &self.creditor_account
    }

    fn render_agent(&self) -> Element {
        Element::new("CdtrAgt").with_child(
            Element::new("FinInstnId")
                .with_child(Element::text_element("Nm", self.creditor_agent_name.as_str()))
                .with_child(self.creditor_agent_postal_account.render()),
        )
    }
}

impl Sealed for Is2CreditTransfer {
    fn core_mut(&mut self, _: Token) -> &mut TransactionCore {
        &mut self.core
    }
}

impl CreditTransferInformation for Is2CreditTransfer {
    fn variant(&self) -> &'static str {
        VARIANT
    }

    fn core(&self) -> &TransactionCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        ensure_currency(VARIANT, &self.core.amount, CURRENCIES)?;

        let country = self.creditor_account.country_code();
        if !IBAN_COUNTRIES.contains(&country) {
            return Err(Error::IncompatibleCapability(format!(
                "{} requires a CH or LI IBAN, got {}",
                VARIANT, self.creditor_account
            )));
        }
        Ok(())
    }

    fn render(&self, context: &dyn PaymentContext) -> Element {
        tracing::trace!(variant = VARIANT, instruction_id = %self.core.instruction_id, "Rendering");

        let mut root = blocks::header(&self.core, context);
        root.push(self.render_agent());
        root.push(blocks::creditor(&self.core));
        root.push(blocks::creditor_account(self.creditor_account.render()));
        blocks::append_purpose(&mut root, &self.core);
        blocks::append_remittance_information(&mut root, &self.core);
        root
    }
}
