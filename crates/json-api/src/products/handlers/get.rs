//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::{ProductRecord, VariantRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    /// Base price as a decimal string, e.g. `"50.00"`
    pub price: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            price: product.price.to_string(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub name: String,

    /// Price override, absent when the variant sells at the product price
    pub price: Option<String>,

    /// What a shopper pays for one unit of this variant
    pub unit_price: String,
}

impl VariantResponse {
    pub(crate) fn new(variant: VariantRecord, product: &ProductRecord) -> Self {
        Self {
            uuid: variant.uuid.into(),
            product_uuid: variant.product_uuid.into(),
            unit_price: variant.unit_price(product).to_string(),
            price: variant.price.map(|price| price.to_string()),
            name: variant.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,

    pub variants: Vec<VariantResponse>,
}

/// Get Product Handler
///
/// Returns a product on sale together with its variants.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner().into();

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    let variants = state
        .app
        .products
        .list_variants(product.uuid)
        .await
        .map_err(into_status_error)?
        .into_iter()
        .map(|variant| VariantResponse::new(variant, &product))
        .collect();

    Ok(Json(ProductDetailsResponse {
        product: product.into(),
        variants,
    }))
}
