//! Configuration for fragment output and currency tables

use money_core::{CurrencyTable, CustomCurrencyTable};
use serde::{Deserialize, Serialize};

/// pain.001 configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// XML output configuration
    #[serde(default)]
    pub xml: XmlConfig,

    /// Additional or overridden currencies on top of ISO 4217
    #[serde(default)]
    pub currencies: Vec<CurrencyOverride>,
}

/// XML output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlConfig {
    /// Pretty print
    pub pretty_print: bool,

    /// Spaces per nesting level when pretty printing
    pub indent: usize,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            indent: 2,
        }
    }
}

/// Currency entry added to the ISO 4217 table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyOverride {
    /// Three-letter code
    pub code: String,

    /// Minor-unit exponent
    pub exponent: u8,
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("PAIN001_PRETTY_PRINT") {
            config.xml.pretty_print = value.parse().map_err(|_| {
                crate::Error::Config(format!("PAIN001_PRETTY_PRINT is not a bool: {}", value))
            })?;
        }

        if let Ok(value) = std::env::var("PAIN001_INDENT") {
            config.xml.indent = value.parse().map_err(|_| {
                crate::Error::Config(format!("PAIN001_INDENT is not a number: {}", value))
            })?;
        }

        Ok(config)
    }

    /// Currency table with the configured overrides applied
    pub fn currency_table(&self) -> crate::Result<impl CurrencyTable> {
        self.currencies
            .iter()
            .try_fold(CustomCurrencyTable::new(), |table, entry| {
                table.with_currency(&entry.code, entry.exponent)
            })
            .map_err(|e| crate::Error::Config(format!("Invalid currency override: {}", e)))
    }
}
