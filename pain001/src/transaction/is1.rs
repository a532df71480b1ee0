//! IS1: payment to a Swiss postal account (orange inpayment slip)

use super::{
    blocks, ensure_currency, Creditor, CreditTransferInformation, PaymentCode, Sealed, Token,
    TransactionCore,
};
use crate::{context::PaymentContext, fragment::Element, identifiers::PostalAccount, Result};
use money_core::Money;

const VARIANT: &str = "IS1";
const LOCAL_INSTRUMENT: &str = "CH01";
const CURRENCIES: &[&str] = &["CHF", "EUR"];

/// Credit transfer to a postal account
#[derive(Debug, Clone)]
pub struct Is1CreditTransfer {
    core: TransactionCore,
    creditor_account: PostalAccount,
}

impl Is1CreditTransfer {
    /// Create an IS1 transfer (CHF or EUR only)
    pub fn new(
        instruction_id: &str,
        end_to_end_id: &str,
        amount: Money,
        creditor: Creditor,
        creditor_account: PostalAccount,
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

    /// Creditor postal account
    pub fn creditor_account(&self) -> &PostalAccount {
        &self.creditor_account
    }
}

impl Sealed for Is1CreditTransfer {
    fn core_mut(&mut self, _: Token) -> &mut TransactionCore {
        &mut self.core
    }
}

impl CreditTransferInformation for Is1CreditTransfer {
    fn variant(&self) -> &'static str {
        VARIANT
    }

    fn core(&self) -> &TransactionCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        ensure_currency(VARIANT, &self.core.amount, CURRENCIES)
    }

    fn render(&self, context: &dyn PaymentContext) -> Element {
        tracing::trace!(variant = VARIANT, instruction_id = %self.core.instruction_id, "Rendering");

        let mut root = blocks::header(&self.core, context);
        root.push(blocks::creditor(&self.core));
        root.push(blocks::creditor_account(self.creditor_account.render()));
        blocks::append_purpose(&mut root, &self.core);
        blocks::append_remittance_information(&mut root, &self.core);
        root
    }
}
