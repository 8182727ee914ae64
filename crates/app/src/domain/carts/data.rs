//! Cart Data

use crate::domain::products::records::{ProductUuid, VariantUuid};

/// Largest quantity a single cart or order line may carry.
pub const MAX_ITEM_QUANTITY: i32 = 10_000;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: i32,
}

/// Whether `quantity` is acceptable for a cart line.
#[must_use]
pub fn is_valid_quantity(quantity: i32) -> bool {
    (1..=MAX_ITEM_QUANTITY).contains(&quantity)
}
