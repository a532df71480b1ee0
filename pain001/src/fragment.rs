//! Document fragments
//!
//! A small element tree that transactions and value types render into.
//! The tree is only turned into bytes at the very end, by [`Element::to_xml`],
//! so fragments can be attached into a larger message by the caller.

use crate::{config::XmlConfig, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data
    Text(String),
}

/// XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding only character data, e.g. `<Nm>value</Nm>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child element
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append character data
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child element in place
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element called `name`
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// All child elements called `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Follow a path of child names, e.g. `["PmtId", "InstrId"]`
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Names of the child elements, in order
    pub fn child_names(&self) -> Vec<&str> {
        self.elements().map(Element::name).collect()
    }

    /// Concatenated character data of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Serialize this fragment (no XML declaration)
    pub fn to_xml(&self, config: &XmlConfig) -> Result<String> {
        let mut writer = if config.pretty_print {
            Writer::new_with_indent(Vec::new(), b' ', config.indent)
        } else {
            Writer::new(Vec::new())
        };

        self.write(&mut writer)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| crate::Error::Xml(format!("Non UTF-8 output: {}", e)))
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write(writer)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> XmlConfig {
        XmlConfig {
            pretty_print: false,
            indent: 0,
        }
    }

    #[test]
    fn test_compact_serialization() {
        let element = Element::new("Amt").with_child(
            Element::text_element("InstdAmt", "12.50").with_attribute("Ccy", "CHF"),
        );

        assert_eq!(
            element.to_xml(&compact()).unwrap(),
            r#"<Amt><InstdAmt Ccy="CHF">12.50</InstdAmt></Amt>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let element = Element::text_element("Nm", "Fish & <Chips>");
        let xml = element.to_xml(&compact()).unwrap();
        assert_eq!(xml, "<Nm>Fish &amp; &lt;Chips&gt;</Nm>");
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(Element::new("Empty").to_xml(&compact()).unwrap(), "<Empty/>");
    }

    #[test]
    fn test_navigation() {
        let element = Element::new("PmtId")
            .with_child(Element::text_element("InstrId", "A"))
            .with_child(Element::text_element("EndToEndId", "B"));

        assert_eq!(element.child_names(), vec!["InstrId", "EndToEndId"]);
        assert_eq!(element.child("EndToEndId").unwrap().text(), "B");

        let root = Element::new("CdtTrfTxInf").with_child(element);
        assert_eq!(root.find(&["PmtId", "InstrId"]).unwrap().text(), "A");
        assert!(root.find(&["PmtId", "TxId"]).is_none());
    }

    #[test]
    fn test_pretty_print_indents_nested_elements() {
        let element = Element::new("Cdtr").with_child(Element::text_element("Nm", "Muster AG"));
        let xml = element
            .to_xml(&XmlConfig {
                pretty_print: true,
                indent: 2,
            })
            .unwrap();

        assert!(xml.starts_with("<Cdtr>\n  <Nm>Muster AG</Nm>"));
        assert!(xml.ends_with("</Cdtr>"));
    }
}
