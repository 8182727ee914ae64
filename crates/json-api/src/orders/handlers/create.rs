//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    orders::{
        errors::{checkout_outcome, into_status_error},
        get::OrderResponse,
    },
    state::State,
};

/// Checkout Request
///
/// Every field is optional. Blank fields are filled from the referenced saved address, and
/// a registered user's email falls back to their account email.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateOrderRequest {
    pub address_uuid: Option<Uuid>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            address_uuid: request.address_uuid.map(Into::into),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            street: request.street,
            city: request.city,
            state: request.state,
            zip: request.zip,
            country: request.country,
        }
    }
}

/// Checkout Handler
///
/// Converts the caller's active cart into a pending order, freezing current prices.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = []), ("guest_token" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, unavailable product or missing shipping field"),
        (status_code = StatusCode::NOT_FOUND, description = "Saved address not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart was checked out concurrently"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No bearer or guest token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_uuid = tracing::field::Empty, total_amount = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let result = state
        .app
        .orders
        .create_order_from_cart(owner, json.into_inner().into())
        .await;

    let order = match result {
        Ok(order) => {
            record_checkout(CheckoutOutcome::Placed);
            order
        }
        Err(error) => {
            record_checkout(checkout_outcome(&error));
            return Err(into_status_error(error));
        }
    };

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order.uuid));
    span.record("total_amount", tracing::field::display(order.total_amount));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
