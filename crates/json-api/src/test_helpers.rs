//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, UserUuid},
    context::AppContext,
    domain::{
        addresses::{
            MockAddressesService,
            records::{AddressRecord, AddressUuid},
        },
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartStatus, CartUuid},
        },
        money::line_total,
        orders::{
            MockOrdersService,
            records::{
                OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
                ShippingContact,
            },
        },
        owners::{GuestToken, Owner},
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::{auth::Identity, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_GUEST_TOKEN: &str = "guest-test-token";

pub(crate) fn test_guest() -> GuestToken {
    GuestToken::parse(TEST_GUEST_TOKEN).expect("test guest token should be valid")
}

pub(crate) fn test_user_owner() -> Owner {
    Owner::User(TEST_USER_UUID)
}

pub(crate) fn test_guest_owner() -> Owner {
    Owner::Guest(test_guest())
}

pub(crate) fn dec(value: &str) -> Decimal {
    value.parse().expect("test decimal should parse")
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: &str) -> ProductRecord {
    ProductRecord {
        uuid,
        name: name.to_string(),
        price: dec(price),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, quantity: u32, price: &str) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: CartUuid::new(),
        product_uuid: product,
        variant_uuid: None,
        quantity,
        product_name: "Test product".to_string(),
        variant_name: None,
        unit_price: dec(price),
        line_total: line_total(dec(price), quantity),
        available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(owner: Owner, items: Vec<CartItemRecord>) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        owner,
        status: CartStatus::Active,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_address(city: &str) -> AddressRecord {
    AddressRecord {
        uuid: AddressUuid::new(),
        user_uuid: TEST_USER_UUID,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        street: "742 Evergreen Terrace".to_string(),
        city: city.to_string(),
        state: "OR".to_string(),
        zip: "97477".to_string(),
        country: "US".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending order with one line per `(quantity, unit price)` pair.
pub(crate) fn make_order(owner: Owner, lines: &[(u32, &str)]) -> OrderRecord {
    let uuid = OrderUuid::new();

    let items: Vec<OrderItemRecord> = lines
        .iter()
        .map(|&(quantity, price)| OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            variant_uuid: None,
            quantity,
            price_at_purchase: dec(price),
            created_at: Timestamp::UNIX_EPOCH,
        })
        .collect();

    OrderRecord {
        uuid,
        owner,
        status: OrderStatus::Pending,
        total_amount: items
            .iter()
            .map(|item| line_total(item.price_at_purchase, item.quantity))
            .sum(),
        shipping: ShippingContact {
            email: "shopper@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street: "742 Evergreen Terrace".to_string(),
            city: "Springfield".to_string(),
            state: "OR".to_string(),
            zip: "97477".to_string(),
            country: "US".to_string(),
        },
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Injects a fixed identity in place of the bearer/guest middleware.
#[derive(Debug, Clone)]
pub(crate) struct InjectIdentity(pub(crate) Identity);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn as_user() -> InjectIdentity {
    InjectIdentity(Identity::User {
        uuid: TEST_USER_UUID,
        is_admin: false,
    })
}

pub(crate) fn as_admin() -> InjectIdentity {
    InjectIdentity(Identity::User {
        uuid: TEST_USER_UUID,
        is_admin: true,
    })
}

pub(crate) fn as_guest() -> InjectIdentity {
    InjectIdentity(Identity::Guest(test_guest()))
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_list_variants().never();
    products.expect_create_variant().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_get_or_create_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order_from_cart().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_list_all_orders().never();
    orders.expect_update_order_status().never();

    orders
}

fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_list_addresses().never();
    addresses.expect_create_address().never();
    addresses.expect_delete_address().never();

    addresses
}

/// An app context whose services all refuse to be called.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        products: Arc::new(strict_products_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        addresses: Arc::new(strict_addresses_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = strict_app();

    app.auth = Arc::new(auth);

    State::from_app_context(app)
}

pub(crate) fn products_app(products: MockProductsService) -> AppContext {
    let mut app = strict_app();

    app.products = Arc::new(products);

    app
}

pub(crate) fn carts_app(carts: MockCartsService) -> AppContext {
    let mut app = strict_app();

    app.carts = Arc::new(carts);

    app
}

pub(crate) fn orders_app(orders: MockOrdersService) -> AppContext {
    let mut app = strict_app();

    app.orders = Arc::new(orders);

    app
}

pub(crate) fn addresses_app(addresses: MockAddressesService) -> AppContext {
    let mut app = strict_app();

    app.addresses = Arc::new(addresses);

    app
}

/// Serve `route` with `app` injected and the caller fixed to `identity`.
pub(crate) fn service_as(app: AppContext, identity: InjectIdentity, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(identity)
            .push(route),
    )
}

/// Serve `route` with `app` injected and no identity.
pub(crate) fn anonymous_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}
