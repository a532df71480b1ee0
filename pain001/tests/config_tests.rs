//! Loading configuration from disk and environment

use money_core::CurrencyTable;
use pain001::{Config, Element, Error};
use std::io::Write;

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[xml]
pretty_print = false
indent = 0

[[currencies]]
code = "XTS"
exponent = 4
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(!config.xml.pretty_print);

    let table = config.currency_table().unwrap();
    assert_eq!(table.exponent("XTS"), Some(4));
    assert_eq!(table.exponent("JPY"), Some(0));

    let xml = Element::new("Cdtr")
        .with_child(Element::text_element("Nm", "Muster AG"))
        .to_xml(&config.xml)
        .unwrap();
    assert_eq!(xml, "<Cdtr><Nm>Muster AG</Nm></Cdtr>");
}

#[test]
fn test_missing_sections_use_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "currencies = []").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.xml.pretty_print);
    assert_eq!(config.xml.indent, 2);
}

#[test]
fn test_invalid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[xml]\npretty_print = \"maybe\"").unwrap();
    assert!(matches!(Config::from_file(file.path()), Err(Error::Config(_))));

    let missing = Config::from_file("/nonexistent/pain001.toml");
    assert!(matches!(missing, Err(Error::Io(_))));
}

#[test]
fn test_from_env() {
    std::env::set_var("PAIN001_PRETTY_PRINT", "false");
    std::env::set_var("PAIN001_INDENT", "4");
    let config = Config::from_env().unwrap();
    assert!(!config.xml.pretty_print);
    assert_eq!(config.xml.indent, 4);

    std::env::set_var("PAIN001_INDENT", "four");
    assert!(matches!(Config::from_env(), Err(Error::Config(_))));

    std::env::remove_var("PAIN001_PRETTY_PRINT");
    std::env::remove_var("PAIN001_INDENT");
}
