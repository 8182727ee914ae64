//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderRecord, ShippingContact};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Owning user; absent for guest orders
    pub user_uuid: Option<Uuid>,

    /// One of pending, processing, shipped, delivered, cancelled
    pub status: String,

    /// Sum of the purchased lines, fixed at checkout
    pub total_amount: String,

    pub shipping: ShippingResponse,

    pub items: Vec<OrderItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.owner.user_uuid(),
            status: order.status.to_string(),
            total_amount: order.total_amount.to_string(),
            shipping: order.shipping.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Shipping contact copied onto the order at checkout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingResponse {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl From<ShippingContact> for ShippingResponse {
    fn from(shipping: ShippingContact) -> Self {
        Self {
            email: shipping.email,
            first_name: shipping.first_name,
            last_name: shipping.last_name,
            street: shipping.street,
            city: shipping.city,
            state: shipping.state,
            zip: shipping.zip,
            country: shipping.country,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub variant_uuid: Option<Uuid>,

    pub quantity: u32,

    /// Unit price at the time of purchase
    pub price_at_purchase: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.map(Into::into),
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders with its items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []), ("guest_token" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No bearer or guest token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let order = state
        .app
        .orders
        .get_order(owner, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
