//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    pub status: String,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals at current catalog prices
    pub subtotal: String,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            status: cart.status.to_string(),
            subtotal: cart.subtotal().to_string(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub variant_uuid: Option<Uuid>,

    pub product_name: String,

    pub variant_name: Option<String>,

    pub quantity: u32,

    /// Current unit price, the variant override when present
    pub unit_price: String,

    pub line_total: String,

    /// False once the product or variant is no longer on sale
    pub available: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.map(Into::into),
            product_name: item.product_name,
            variant_name: item.variant_name,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total.to_string(),
            available: item.available,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's active cart, starting an empty one if needed.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []), ("guest_token" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No bearer or guest token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_cart(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
