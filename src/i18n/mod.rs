//! Localization boundary and writing-direction resolution.
//!
//! The layout engine never owns translations: it asks a [`Localizer`] for
//! every label and fails the render when one is missing.

mod catalog;

pub use catalog::Catalog;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The single language tag that lays documents out right-to-left
pub const RTL_LANGUAGE: &str = "ar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Exactly one tag selects RTL; anything else, including unknown tags, is LTR.
    pub fn from_language(tag: &str) -> Self {
        if tag == RTL_LANGUAGE {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// Message keys used by the document
pub mod keys {
    pub const INVOICE: &str = "pdf.invoice";
    pub const DATE: &str = "pdf.date";
    pub const INVOICE_NUMBER: &str = "pdf.invoiceNumber";
    pub const FROM: &str = "pdf.from";
    pub const BILL_TO: &str = "pdf.billTo";
    pub const PRODUCT_NAME: &str = "pdf.productName";
    pub const QUANTITY: &str = "pdf.quantity";
    pub const PRICE: &str = "pdf.price";
    pub const TOTAL: &str = "pdf.total";
    pub const SUBTOTAL: &str = "pdf.subtotal";
    pub const DISCOUNT: &str = "pdf.discount";
    pub const TAX: &str = "pdf.tax";
    pub const TERMS_AND_PRIVACY: &str = "pdf.termsAndPrivacy";
    pub const NOTES: &str = "pdf.notes";
    pub const THANK_YOU: &str = "pdf.thankYou";
    pub const CURRENCY: &str = "pdf.currency";
    /// Pattern with `{day}`, `{month}` and `{year}` placeholders
    pub const DATE_FORMAT: &str = "date.format";

    pub const MONTHS: [&str; 12] = [
        "date.month.1",
        "date.month.2",
        "date.month.3",
        "date.month.4",
        "date.month.5",
        "date.month.6",
        "date.month.7",
        "date.month.8",
        "date.month.9",
        "date.month.10",
        "date.month.11",
        "date.month.12",
    ];
}

/// String-resolution service keyed by (message key, language tag).
pub trait Localizer {
    /// Resolve `key` for `language`. Implementations must fail with
    /// [`crate::InvoiceError::MissingMessage`] rather than fall back to another
    /// language or an empty string.
    fn message(&self, key: &str, language: &str) -> Result<&str>;
}

/// Format a date with the language's month names and pattern
pub fn format_date(localizer: &dyn Localizer, language: &str, date: NaiveDate) -> Result<String> {
    let pattern = localizer.message(keys::DATE_FORMAT, language)?;
    let month = localizer.message(keys::MONTHS[date.month0() as usize], language)?;
    Ok(pattern
        .replace("{day}", &date.day().to_string())
        .replace("{month}", month)
        .replace("{year}", &date.year().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvoiceError;

    #[test]
    fn only_arabic_is_rtl() {
        assert_eq!(Direction::from_language("ar"), Direction::Rtl);
        assert_eq!(Direction::from_language("en"), Direction::Ltr);
        assert_eq!(Direction::from_language("he"), Direction::Ltr);
        assert_eq!(Direction::from_language("ar-EG"), Direction::Ltr);
        assert_eq!(Direction::from_language(""), Direction::Ltr);
    }

    #[test]
    fn flipping_twice_is_identity() {
        assert_eq!(Direction::Ltr.flipped(), Direction::Rtl);
        assert_eq!(Direction::Rtl.flipped().flipped(), Direction::Rtl);
    }

    #[test]
    fn dates_use_language_pattern() {
        let catalog = Catalog::builtin();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_date(&catalog, "en", date).unwrap(), "October 19, 2026");
        assert_eq!(format_date(&catalog, "ar", date).unwrap(), "19 أكتوبر 2026");
    }

    #[test]
    fn date_in_unknown_language_fails_closed() {
        let catalog = Catalog::builtin();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let err = format_date(&catalog, "fr", date).unwrap_err();
        assert!(matches!(err, InvoiceError::MissingMessage { ref language, .. } if language == "fr"));
    }
}
