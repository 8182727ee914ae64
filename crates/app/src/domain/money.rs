//! Monetary amounts.
//!
//! Amounts are [`Decimal`] values stored as `NUMERIC(12, 2)`.

use rust_decimal::Decimal;

/// Number of fractional digits carried by every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Exclusive upper bound imposed by `NUMERIC(12, 2)`.
const MONEY_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Whether `amount` can be stored as a price without rounding.
#[must_use]
pub fn is_valid_amount(amount: Decimal) -> bool {
    !amount.is_sign_negative() && amount.normalize().scale() <= MONEY_SCALE && amount < MONEY_LIMIT
}

/// Price of `quantity` units, rescaled to [`MONEY_SCALE`].
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    let mut total = unit_price * Decimal::from(quantity);

    total.rescale(MONEY_SCALE);

    total
}
