//! Create Product Variant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::{data::NewVariant, records::VariantUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::VariantResponse},
    state::State,
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    /// Price override as a decimal string; omit to sell at the product price
    #[serde(default)]
    pub price: Option<String>,
}

/// Create Variant Handler
#[endpoint(
    tags("admin"),
    summary = "Create Product Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Variant already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner().into();
    let request = json.into_inner();

    let variant = NewVariant {
        uuid: request.uuid.map_or_else(VariantUuid::new, Into::into),
        price: request
            .price
            .as_deref()
            .map(|price| price.into_amount("price"))
            .transpose()?,
        name: request.name,
    };

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    let variant = state
        .app
        .products
        .create_variant(product.uuid, variant)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(VariantResponse::new(variant, &product)))
}
