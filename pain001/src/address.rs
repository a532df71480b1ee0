//! Postal addresses
//!
//! Transactions only see the [`PostalAddress`] trait and attach whatever
//! `PstlAdr` fragment it renders.

use crate::{
    fragment::Element,
    text::{assert_optional_text, assert_required_text, Text},
    Error, Result, ValidationKind,
};
use std::fmt;

/// Something that renders a `<PstlAdr>` fragment
pub trait PostalAddress: fmt::Debug + Send + Sync {
    /// `<PstlAdr>`
    fn render(&self) -> Element;
}

fn assert_country(country: &str) -> Result<String> {
    if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Error::validation(
            "country",
            ValidationKind::Format(format!("expected ISO 3166 alpha-2 code, got {:?}", country)),
        ));
    }
    Ok(country.to_string())
}

/// Address split into street, building, post code, town and country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredPostalAddress {
    street: Option<Text>,
    building_number: Option<Text>,
    post_code: Text,
    town: Text,
    country: String,
}

impl StructuredPostalAddress {
    /// Create a structured address
    pub fn new(
        street: Option<&str>,
        building_number: Option<&str>,
        post_code: &str,
        town: &str,
        country: &str,
    ) -> Result<Self> {
        Ok(Self {
            street: assert_optional_text(street, 70).map_err(|e| e.in_field("street"))?,
            building_number: assert_optional_text(building_number, 16)
                .map_err(|e| e.in_field("building_number"))?,
            post_code: assert_required_text(post_code, 16).map_err(|e| e.in_field("post_code"))?,
            town: assert_required_text(town, 35).map_err(|e| e.in_field("town"))?,
            country: assert_country(country)?,
        })
    }
}

impl PostalAddress for StructuredPostalAddress {
    fn render(&self) -> Element {
        let mut address = Element::new("PstlAdr");
        if let Some(street) = &self.street {
            address.push(Element::text_element("StrtNm", street.as_str()));
        }
        if let Some(number) = &self.building_number {
            address.push(Element::text_element("BldgNb", number.as_str()));
        }
        address
            .with_child(Element::text_element("PstCd", self.post_code.as_str()))
            .with_child(Element::text_element("TwnNm", self.town.as_str()))
            .with_child(Element::text_element("Ctry", self.country.as_str()))
    }
}

/// Address given as up to two free-text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstructuredPostalAddress {
    country: String,
    lines: Vec<Text>,
}

impl UnstructuredPostalAddress {
    /// Maximum number of address lines
    pub const MAX_LINES: usize = 2;

    /// Create an unstructured address; blank lines are dropped
    pub fn new(lines: &[&str], country: &str) -> Result<Self> {
        if lines.len() > Self::MAX_LINES {
            return Err(Error::validation(
                "address_line",
                ValidationKind::Format(format!(
                    "at most {} address lines, got {}",
                    Self::MAX_LINES,
                    lines.len()
                )),
            ));
        }

        let lines = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| assert_required_text(line, 70).map_err(|e| e.in_field("address_line")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            country: assert_country(country)?,
            lines,
        })
    }
}

impl PostalAddress for UnstructuredPostalAddress {
    fn render(&self) -> Element {
        let address = Element::new("PstlAdr")
            .with_child(Element::text_element("Ctry", self.country.as_str()));
        self.lines.iter().fold(address, |address, line| {
            address.with_child(Element::text_element("AdrLine", line.as_str()))
        })
    }
}
