use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Party;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Language tag used when an invoice file does not name one
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub sender: Party,
    #[serde(default)]
    pub defaults: InvoiceDefaults,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct InvoiceDefaults {
    /// Tax percentage, 0-100
    #[serde(default)]
    pub tax: Decimal,
    /// Discount percentage, 0-100
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    pub dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            sender: Party::default(),
            defaults: InvoiceDefaults::default(),
            output: OutputSettings::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
