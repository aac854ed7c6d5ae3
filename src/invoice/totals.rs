use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::config::LineItem;
use crate::error::{InvoiceError, Result};

/// Digits shown after the decimal point for every monetary figure
pub const MONEY_DECIMALS: u32 = 2;

/// Aggregated figures for one invoice, kept at full precision.
///
/// Nothing here is rounded; rounding happens once, in [`format_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Compute subtotal, discount, tax and grand total.
///
/// Percentages are taken as given (0-100 by contract). Negative quantities or
/// prices simply contribute negative amounts. Figures beyond the range of
/// [`Decimal`] are reported as [`InvoiceError::AmountOverflow`].
pub fn compute(items: &[LineItem], tax_pct: Decimal, discount_pct: Decimal) -> Result<Totals> {
    let subtotal = items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.line_total()?)
            .ok_or(InvoiceError::AmountOverflow("subtotal"))
    })?;
    let discount_amount = percent_of(subtotal, discount_pct, "discount")?;
    let tax_amount = percent_of(subtotal, tax_pct, "tax")?;
    let grand_total = subtotal
        .checked_sub(discount_amount)
        .and_then(|net| net.checked_add(tax_amount))
        .ok_or(InvoiceError::AmountOverflow("grand total"))?;

    Ok(Totals {
        subtotal,
        discount_amount,
        tax_amount,
        grand_total,
    })
}

fn percent_of(amount: Decimal, pct: Decimal, what: &'static str) -> Result<Decimal> {
    amount
        .checked_mul(pct)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(InvoiceError::AmountOverflow(what))
}

/// Round half away from zero to two digits and always print both digits.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMALS);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Quantities and rates print without trailing zeros ("2", "1.5")
pub fn format_number(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.is_zero() {
        return "0".to_string();
    }
    normalized.to_string()
}
