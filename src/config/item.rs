use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, Result};

/// A single invoice row. Quantity and price accept TOML integers, floats or
/// decimal strings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LineItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: &str, quantity: Decimal, price: Decimal) -> Self {
        Self {
            name: Some(name.to_string()),
            description: None,
            quantity,
            price,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// quantity × price, unrounded
    pub fn line_total(&self) -> Result<Decimal> {
        self.quantity
            .checked_mul(self.price)
            .ok_or(InvoiceError::AmountOverflow("line total"))
    }
}
