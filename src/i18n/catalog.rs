use std::collections::BTreeMap;

use super::{keys, Localizer};
use crate::error::{InvoiceError, Result};

const EN: &[(&str, &str)] = &[
    (keys::INVOICE, "INVOICE"),
    (keys::DATE, "Date"),
    (keys::INVOICE_NUMBER, "Invoice #"),
    (keys::FROM, "From"),
    (keys::BILL_TO, "Bill To"),
    (keys::PRODUCT_NAME, "Product"),
    (keys::QUANTITY, "Quantity"),
    (keys::PRICE, "Price"),
    (keys::TOTAL, "Total"),
    (keys::SUBTOTAL, "Subtotal"),
    (keys::DISCOUNT, "Discount"),
    (keys::TAX, "Tax"),
    (keys::TERMS_AND_PRIVACY, "Terms & Privacy"),
    (keys::NOTES, "Notes"),
    (keys::THANK_YOU, "Thank you for your business!"),
    (keys::CURRENCY, "$"),
    (keys::DATE_FORMAT, "{month} {day}, {year}"),
    ("date.month.1", "January"),
    ("date.month.2", "February"),
    ("date.month.3", "March"),
    ("date.month.4", "April"),
    ("date.month.5", "May"),
    ("date.month.6", "June"),
    ("date.month.7", "July"),
    ("date.month.8", "August"),
    ("date.month.9", "September"),
    ("date.month.10", "October"),
    ("date.month.11", "November"),
    ("date.month.12", "December"),
];

const AR: &[(&str, &str)] = &[
    (keys::INVOICE, "فاتورة"),
    (keys::DATE, "التاريخ"),
    (keys::INVOICE_NUMBER, "رقم الفاتورة"),
    (keys::FROM, "من"),
    (keys::BILL_TO, "فاتورة إلى"),
    (keys::PRODUCT_NAME, "المنتج"),
    (keys::QUANTITY, "الكمية"),
    (keys::PRICE, "السعر"),
    (keys::TOTAL, "الإجمالي"),
    (keys::SUBTOTAL, "المجموع الفرعي"),
    (keys::DISCOUNT, "الخصم"),
    (keys::TAX, "الضريبة"),
    (keys::TERMS_AND_PRIVACY, "الشروط والخصوصية"),
    (keys::NOTES, "ملاحظات"),
    (keys::THANK_YOU, "شكراً لتعاملكم معنا!"),
    (keys::CURRENCY, "$"),
    (keys::DATE_FORMAT, "{day} {month} {year}"),
    ("date.month.1", "يناير"),
    ("date.month.2", "فبراير"),
    ("date.month.3", "مارس"),
    ("date.month.4", "أبريل"),
    ("date.month.5", "مايو"),
    ("date.month.6", "يونيو"),
    ("date.month.7", "يوليو"),
    ("date.month.8", "أغسطس"),
    ("date.month.9", "سبتمبر"),
    ("date.month.10", "أكتوبر"),
    ("date.month.11", "نوفمبر"),
    ("date.month.12", "ديسمبر"),
];

/// In-memory translation table: language tag -> key -> text.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// Empty catalog; every lookup fails until tables are inserted
    pub fn new() -> Self {
        Self::default()
    }

    /// English and Arabic tables shipped with the crate
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert_table("en", EN);
        catalog.insert_table("ar", AR);
        catalog
    }

    /// Parse `[lang]` tables of `key = "text"` pairs
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let languages: BTreeMap<String, BTreeMap<String, String>> = toml::from_str(content)?;
        Ok(Self { languages })
    }

    pub fn insert(&mut self, language: &str, key: &str, text: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    fn insert_table(&mut self, language: &str, table: &[(&str, &str)]) {
        for (key, text) in table {
            self.insert(language, key, text);
        }
    }

    /// Entries in `other` win over existing ones
    pub fn merge(&mut self, other: Catalog) {
        for (language, table) in other.languages {
            self.languages.entry(language).or_default().extend(table);
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

impl Localizer for Catalog {
    fn message(&self, key: &str, language: &str) -> Result<&str> {
        self.languages
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .ok_or_else(|| InvoiceError::missing_message(key, language))
    }
}
