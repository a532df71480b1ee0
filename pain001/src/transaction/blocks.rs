//! Fragment building blocks shared by all credit transfer types

use super::TransactionCore;
use crate::{context::PaymentContext, fragment::Element, identifiers::FinancialInstitution};

/// `CdtTrfTxInf` with `PmtId`, optional `PmtTpInf` and `Amt`
pub(super) fn header(core: &TransactionCore, context: &dyn PaymentContext) -> Element {
    let mut root = Element::new("CdtTrfTxInf").with_child(
        Element::new("PmtId")
            .with_child(Element::text_element("InstrId", core.instruction_id.as_str()))
            .with_child(Element::text_element("EndToEndId", core.end_to_end_id.as_str())),
    );

    // The payment information owns PmtTpInf once it declares any of it
    if !context.has_payment_type_information() {
        if let Some(payment_type) = payment_type_information(core) {
            root.push(payment_type);
        }
    }

    root.with_child(
        Element::new("Amt").with_child(
            Element::text_element("InstdAmt", core.amount.format())
                .with_attribute("Ccy", core.amount.currency().code()),
        ),
    )
}

fn payment_type_information(core: &TransactionCore) -> Option<Element> {
    let service_level = core.service_level.value();
    let local_instrument = core.local_instrument.value();
    if service_level.is_none() && local_instrument.is_none() {
        return None;
    }

    let mut payment_type = Element::new("PmtTpInf");
    if let Some(code) = service_level {
        payment_type.push(Element::new("SvcLvl").with_child(Element::text_element("Cd", code)));
    }
    if let Some(code) = local_instrument {
        payment_type
            .push(Element::new("LclInstrm").with_child(Element::text_element("Prtry", code)));
    }
    Some(payment_type)
}

/// `Cdtr` with name and optional postal address
pub(super) fn creditor(core: &TransactionCore) -> Element {
    let mut creditor =
        Element::new("Cdtr").with_child(Element::text_element("Nm", core.creditor.name.as_str()));
    if let Some(address) = core.creditor.address() {
        creditor.push(address.render());
    }
    creditor
}

/// `CdtrAgt` wrapping a `FinInstnId`
pub(super) fn creditor_agent(institution: &FinancialInstitution) -> Element {
    Element::new("CdtrAgt").with_child(institution.render())
}

/// `CdtrAcct/Id` wrapping an account identification
pub(super) fn creditor_account(identification: Element) -> Element {
    Element::new("CdtrAcct").with_child(Element::new("Id").with_child(identification))
}

/// `Purp/Cd`, if a purpose is set
pub(super) fn append_purpose(root: &mut Element, core: &TransactionCore) {
    if let Some(purpose) = &core.purpose {
        root.push(Element::new("Purp").with_child(purpose.render()));
    }
}

/// `RmtInf/Ustrd`, unless the text is missing or blank
pub(super) fn append_remittance_information(root: &mut Element, core: &TransactionCore) {
    if let Some(text) = core.remittance_information.as_ref().filter(|text| !text.is_blank()) {
        root.push(Element::new("RmtInf").with_child(Element::text_element("Ustrd", text.as_str())));
    }
}
