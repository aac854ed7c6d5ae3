use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{Config, InvoiceFile, LineItem, Party};

/// Immutable snapshot consumed by a single render call
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceInput {
    pub number: String,
    pub date: NaiveDate,
    pub sender: Party,
    pub customer: Party,
    /// Rendered in this order
    pub items: Vec<LineItem>,
    pub tax_pct: Decimal,
    pub discount_pct: Decimal,
    pub privacy: Option<String>,
    pub notes: Option<String>,
    /// Language tag; also decides the writing direction
    pub language: String,
}

impl InvoiceInput {
    /// Fill the gaps of an invoice file from config.toml
    pub fn from_file(file: InvoiceFile, config: &Config, today: NaiveDate) -> Self {
        Self {
            number: file.number,
            date: file.date.unwrap_or(today),
            sender: file.sender.unwrap_or_else(|| config.sender.clone()),
            customer: file.customer,
            items: file.items,
            tax_pct: file.tax.unwrap_or(config.defaults.tax),
            discount_pct: file.discount.unwrap_or(config.defaults.discount),
            privacy: file.privacy.or_else(|| config.defaults.privacy.clone()),
            notes: file.notes.or_else(|| config.defaults.notes.clone()),
            language: file.language.unwrap_or_else(|| config.language.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_win_over_config() {
        let mut config = Config::default();
        config.language = "ar".to_string();
        config.defaults.tax = Decimal::from(15);
        config.defaults.notes = Some("config notes".to_string());
        config.sender.name = Some("Config Sender".to_string());

        let file: InvoiceFile = toml::from_str(
            r#"number = "A-7"
date = "2026-03-01"
tax = 5
[[items]]
quantity = 1
price = 2
"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let input = InvoiceInput::from_file(file, &config, today);

        assert_eq!(input.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(input.tax_pct, Decimal::from(5));
        assert_eq!(input.discount_pct, Decimal::ZERO);
        assert_eq!(input.language, "ar");
        assert_eq!(input.notes.as_deref(), Some("config notes"));
        assert_eq!(input.sender.name.as_deref(), Some("Config Sender"));
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let file: InvoiceFile = toml::from_str("number = \"A-8\"\nitems = []\n").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let input = InvoiceInput::from_file(file, &Config::default(), today);
        assert_eq!(input.date, today);
        assert_eq!(input.language, "en");
        assert!(input.items.is_empty());
    }
}
