//! Checkout pricing.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    carts::records::CartItemRecord,
    money::{is_valid_amount, line_total},
    products::records::{ProductUuid, VariantUuid},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} is no longer available")]
    Unavailable(ProductUuid),

    #[error("order total exceeds the storable range")]
    TotalOutOfRange,
}

/// A cart line with its price fixed for the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total_amount: Decimal,
}

/// Freeze each line's resolved unit price and sum the order total.
///
/// # Errors
///
/// Fails for an empty cart, a line whose product or variant was withdrawn, or a total
/// too large to store.
pub fn price_cart(items: &[CartItemRecord]) -> Result<PricedCart, PricingError> {
    if items.is_empty() {
        return Err(PricingError::EmptyCart);
    }

    let mut total_amount = Decimal::ZERO;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        if !item.available {
            return Err(PricingError::Unavailable(item.product_uuid));
        }

        total_amount += line_total(item.unit_price, item.quantity);

        lines.push(PricedLine {
            product_uuid: item.product_uuid,
            variant_uuid: item.variant_uuid,
            quantity: item.quantity,
            price_at_purchase: item.unit_price,
        });
    }

    if !is_valid_amount(total_amount) {
        return Err(PricingError::TotalOutOfRange);
    }

    Ok(PricedCart {
        lines,
        total_amount,
    })
}
