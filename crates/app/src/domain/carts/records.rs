//! Cart Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        money::MONEY_SCALE,
        owners::Owner,
        products::records::{ProductUuid, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart lifecycle state. Only active carts accept changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    Converted,
}

impl CartStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Converted => "converted",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCartStatus(pub String);

impl fmt::Display for UnknownCartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cart status {:?}", self.0)
    }
}

impl std::error::Error for UnknownCartStatus {}

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "converted" => Ok(Self::Converted),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: Owner,
    pub status: CartStatus,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of every line total at current catalog prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        let mut subtotal: Decimal = self.items.iter().map(|item| item.line_total).sum();

        subtotal.rescale(MONEY_SCALE);

        subtotal
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A cart line expanded with its product summary.
///
/// Prices are resolved from the catalog when the line is read; nothing is stored on the item.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: u32,
    pub product_name: String,
    pub variant_name: Option<String>,
    pub unit_price: Decimal,
    pub line_total: Decimal,

    /// False once the product or variant has been withdrawn from sale.
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
