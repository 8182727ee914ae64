//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    domain::{
        addresses::{data::NewAddress, records::AddressUuid},
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartItemRecord},
        orders::data::NewOrder,
        owners::{GuestToken, Owner},
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, NewVariant},
            records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("test decimal literal should parse")
}

pub(crate) fn guest(token: &str) -> Owner {
    Owner::Guest(GuestToken::parse(token).expect("test guest token should be valid"))
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: &str,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price: dec(price),
        })
        .await
}

pub(crate) async fn create_variant(
    ctx: &TestContext,
    product: ProductUuid,
    name: &str,
    price: Option<&str>,
) -> Result<VariantRecord, ProductsServiceError> {
    ctx.products
        .create_variant(
            product,
            NewVariant {
                uuid: VariantUuid::new(),
                name: name.to_string(),
                price: price.map(dec),
            },
        )
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    owner: &Owner,
    product: ProductUuid,
    variant: Option<VariantUuid>,
    quantity: i32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            owner.clone(),
            NewCartItem {
                product_uuid: product,
                variant_uuid: variant,
                quantity,
            },
        )
        .await
}

pub(crate) fn new_address(uuid: AddressUuid) -> NewAddress {
    NewAddress {
        uuid,
        first_name: "Marge".to_string(),
        last_name: "Simpson".to_string(),
        street: "742 Evergreen Terrace".to_string(),
        city: "Springfield".to_string(),
        state: "OR".to_string(),
        zip: "97475".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) fn checkout_request() -> NewOrder {
    NewOrder {
        address_uuid: None,
        email: Some("homer@example.com".to_string()),
        first_name: Some("Homer".to_string()),
        last_name: Some("Simpson".to_string()),
        street: Some("742 Evergreen Terrace".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("OR".to_string()),
        zip: Some("97475".to_string()),
        country: Some("US".to_string()),
    }
}
