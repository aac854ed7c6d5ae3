use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LineItem, Party};

/// On-disk invoice snapshot. Anything optional falls back to config.toml.
#[derive(Debug, Deserialize, Serialize)]
pub struct InvoiceFile {
    pub number: String,
    /// Issue date as "YYYY-MM-DD"; today when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub tax: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default)]
    pub customer: Party,
    /// Required: a file without an items array is rejected
    pub items: Vec<LineItem>,
}
