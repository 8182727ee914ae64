//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        addresses::PgAddressesRepository,
        carts::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            pricing::price_cart,
            records::{OrderRecord, OrderStatus, OrderUuid, ShippingContact},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        owners::Owner,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    addresses_repository: PgAddressesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
        }
    }

    async fn resolve_shipping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
        mut order: NewOrder,
    ) -> Result<ShippingContact, OrdersServiceError> {
        let address = match (owner, order.address_uuid.take()) {
            (Owner::User(user), Some(address)) => Some(
                self.addresses_repository
                    .get_address(tx, *user, address)
                    .await?,
            ),
            (Owner::Guest(_), Some(_)) => return Err(OrdersServiceError::NotFound),
            (_, None) => None,
        };

        let account_email = match owner {
            Owner::User(user) => self.orders_repository.get_user_email(tx, *user).await?,
            Owner::Guest(_) => None,
        };

        order
            .resolve_shipping(address.as_ref(), account_email)
            .map_err(OrdersServiceError::MissingShippingField)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), OrdersServiceError> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items_by_order: HashMap<OrderUuid, Vec<_>> = HashMap::new();

        for item in self.items_repository.get_order_items(tx, &uuids).await? {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(skip(self, owner, order), fields(owner = %owner), err)]
    async fn create_order_from_cart(
        &self,
        owner: Owner,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        // Held until commit so a second checkout of this cart waits, then finds no active cart.
        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, &owner)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let priced = price_cart(&items)?;

        let shipping = self.resolve_shipping(&mut tx, &owner, order).await?;

        // Inputs are validated by now; any database error from here on is a failed
        // transaction, not a caller mistake.
        let mut created = self
            .orders_repository
            .create_order(
                &mut tx,
                OrderUuid::new(),
                &owner,
                priced.total_amount,
                shipping,
            )
            .await
            .map_err(OrdersServiceError::Sql)?;

        for line in &priced.lines {
            let item = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, line)
                .await
                .map_err(OrdersServiceError::Sql)?;

            created.items.push(item);
        }

        let converted = self
            .carts_repository
            .mark_converted(&mut tx, cart.uuid)
            .await
            .map_err(OrdersServiceError::Sql)?;

        if converted != 1 {
            return Err(OrdersServiceError::CartNotActive);
        }

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await
            .map_err(OrdersServiceError::Sql)?;

        tx.commit().await.map_err(OrdersServiceError::Sql)?;

        tracing::info!(
            order = %created.uuid,
            cart = %cart.uuid,
            total = %created.total_amount,
            lines = created.items.len(),
            "converted cart to order"
        );

        Ok(created)
    }

    async fn list_orders(&self, owner: Owner) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, &owner).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        owner: Owner,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders_repository
            .get_order(&mut tx, &owner, order)
            .await?;

        let mut orders = [order];

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [order] = orders;

        Ok(order)
    }

    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_all_orders(&mut tx).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| OrdersServiceError::InvalidStatus(e.0))?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        let mut orders = [updated];

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [updated] = orders;

        tracing::info!(order = %updated.uuid, %status, "updated order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the owner's active cart into a pending order.
    ///
    /// Line prices and the total are fixed at this point. The cart is marked converted and
    /// emptied in the same transaction.
    async fn create_order_from_cart(
        &self,
        owner: Owner,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The owner's orders, newest first.
    async fn list_orders(&self, owner: Owner) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the owner's orders with its items.
    async fn get_order(
        &self,
        owner: Owner,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to any known status.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            addresses::{AddressesService, records::AddressUuid},
            carts::{CartsService, records::CartStatus},
            products::{ProductsService, data::ProductUpdate},
        },
        test::{
            TestContext,
            helpers::{
                add_item, checkout_request, create_product, create_variant, dec, guest,
                new_address,
            },
        },
    };

    use super::*;

    async fn count(ctx: &TestContext, table: &str) -> Result<i64, sqlx::Error> {
        query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(ctx.db.pool())
            .await
    }

    #[tokio::test]
    async fn checkout_totals_and_snapshots_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let shirt = create_product(&ctx, "Shirt", "50.00").await?;
        let mug = create_product(&ctx, "Mug", "30.00").await?;

        add_item(&ctx, &owner, shirt.uuid, None, 2).await?;
        add_item(&ctx, &owner, mug.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await?;

        assert_eq!(order.owner, owner);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, dec("130.00"));
        assert_eq!(order.items.len(), 2);

        let shirt_line = order
            .items
            .iter()
            .find(|item| item.product_uuid == shirt.uuid)
            .ok_or("shirt line missing")?;

        assert_eq!(shirt_line.price_at_purchase, dec("50.00"));
        assert_eq!(shirt_line.quantity, 2);

        let mug_line = order
            .items
            .iter()
            .find(|item| item.product_uuid == mug.uuid)
            .ok_or("mug line missing")?;

        assert_eq!(mug_line.price_at_purchase, dec("30.00"));
        assert_eq!(mug_line.quantity, 1);

        let items_total = order
            .items
            .iter()
            .map(|item| item.price_at_purchase * rust_decimal::Decimal::from(item.quantity))
            .sum::<rust_decimal::Decimal>();

        assert_eq!(items_total, order.total_amount);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_uses_variant_price_override() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let shirt = create_product(&ctx, "Shirt", "20.00").await?;
        let large = create_variant(&ctx, shirt.uuid, "Large", Some("25.00")).await?;

        add_item(&ctx, &owner, shirt.uuid, Some(large.uuid), 2).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner, checkout_request())
            .await?;

        let line = order.items.first().ok_or("order should have a line")?;

        assert_eq!(line.variant_uuid, Some(large.uuid));
        assert_eq!(line.price_at_purchase, dec("25.00"));
        assert_eq!(order.total_amount, dec("50.00"));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_converts_and_empties_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        let item = add_item(&ctx, &owner, product.uuid, None, 1).await?;

        ctx.orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await?;

        assert!(
            ctx.carts.get_cart(owner.clone()).await?.is_none(),
            "owner should have no active cart after checkout"
        );

        let status: String = query_scalar("SELECT status FROM carts WHERE uuid = $1")
            .bind(item.cart_uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(status, CartStatus::Converted.as_str());
        assert_eq!(count(&ctx, "cart_items").await?, 0);

        let next = add_item(&ctx, &owner, product.uuid, None, 1).await?;

        assert_ne!(next.cart_uuid, item.cart_uuid, "a fresh cart should be created");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_cart_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .create_order_from_cart(guest("guest-a"), checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);
        assert_eq!(count(&ctx, "order_items").await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");

        ctx.carts.get_or_create_cart(owner.clone()).await?;

        let result = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should remain")?;

        assert_eq!(cart.status, CartStatus::Active);

        Ok(())
    }

    #[tokio::test]
    async fn catalog_changes_do_not_alter_placed_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 3).await?;

        let placed = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: "Mug".to_string(),
                    price: dec("99.00"),
                },
            )
            .await?;

        let reloaded = ctx.orders.get_order(owner, placed.uuid).await?;

        assert_eq!(reloaded.total_amount, dec("24.00"));
        assert!(
            reloaded
                .items
                .iter()
                .all(|item| item.price_at_purchase == dec("8.00")),
            "price_at_purchase should keep the checkout price"
        );

        Ok(())
    }

    #[tokio::test]
    async fn price_at_purchase_cannot_be_rewritten() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner, checkout_request())
            .await?;

        let result = sqlx::query("UPDATE order_items SET price_at_purchase = 1 WHERE order_uuid = $1")
            .bind(order.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await;

        assert!(result.is_err(), "price rewrite should be rejected");

        Ok(())
    }

    #[tokio::test]
    async fn failed_item_insert_rolls_back_everything() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 2).await?;

        sqlx::raw_sql(
            "CREATE FUNCTION fail_order_item() RETURNS trigger AS $$ \
             BEGIN RAISE EXCEPTION 'order item insert failed'; END; \
             $$ LANGUAGE plpgsql; \
             CREATE TRIGGER fail_order_item BEFORE INSERT ON order_items \
             FOR EACH ROW EXECUTE FUNCTION fail_order_item();",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);
        assert_eq!(count(&ctx, "order_items").await?, 0);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should remain")?;

        assert_eq!(cart.status, CartStatus::Active);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| item.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn constraint_violation_on_item_insert_is_a_storage_failure() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 2).await?;

        // Order lines must now reference a listing the product is missing from.
        sqlx::raw_sql(
            "CREATE TABLE listed_products (uuid UUID PRIMARY KEY); \
             ALTER TABLE order_items ADD CONSTRAINT order_items_listed_fkey \
             FOREIGN KEY (product_uuid) REFERENCES listed_products (uuid);",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);
        assert_eq!(count(&ctx, "order_items").await?, 0);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should remain")?;

        assert_eq!(cart.status, CartStatus::Active);
        assert_eq!(cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn conversion_touching_no_cart_aborts_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        // Silently swallow status changes so the conversion matches no row.
        sqlx::raw_sql(
            "CREATE FUNCTION skip_cart_conversion() RETURNS trigger AS $$ \
             BEGIN RETURN NULL; END; \
             $$ LANGUAGE plpgsql; \
             CREATE TRIGGER skip_cart_conversion BEFORE UPDATE ON carts \
             FOR EACH ROW WHEN (NEW.status = 'converted') \
             EXECUTE FUNCTION skip_cart_conversion();",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::CartNotActive)),
            "expected CartNotActive, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should remain")?;

        assert_eq!(cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_unavailable_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx
            .orders
            .create_order_from_cart(owner, checkout_request())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::UnavailableProduct(p)) if p == product.uuid),
            "expected UnavailableProduct, got {result:?}"
        );
        assert_eq!(count(&ctx, "orders").await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_requires_shipping_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let request = NewOrder {
            country: None,
            ..checkout_request()
        };

        let result = ctx.orders.create_order_from_cart(owner.clone(), request).await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingShippingField("country"))),
            "expected MissingShippingField(country), got {result:?}"
        );

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should remain")?;

        assert_eq!(cart.items.len(), 1, "cart should keep its items");

        Ok(())
    }

    #[tokio::test]
    async fn saved_address_and_account_email_fill_shipping() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await?;
        let owner = Owner::User(user);
        let product = create_product(&ctx, "Mug", "8.00").await?;

        let address = ctx
            .addresses
            .create_address(user, new_address(AddressUuid::new()))
            .await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(
                owner,
                NewOrder {
                    address_uuid: Some(address.uuid),
                    ..NewOrder::default()
                },
            )
            .await?;

        assert_eq!(order.shipping.email, "shopper@example.com");
        assert_eq!(order.shipping.first_name, address.first_name);
        assert_eq!(order.shipping.city, address.city);

        Ok(())
    }

    #[tokio::test]
    async fn another_users_address_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com").await?;
        let bob = ctx.create_user("bob@example.com").await?;
        let product = create_product(&ctx, "Mug", "8.00").await?;

        let address = ctx
            .addresses
            .create_address(alice, new_address(AddressUuid::new()))
            .await?;

        add_item(&ctx, &Owner::User(bob), product.uuid, None, 1).await?;

        let result = ctx
            .orders
            .create_order_from_cart(
                Owner::User(bob),
                NewOrder {
                    address_uuid: Some(address.uuid),
                    ..checkout_request()
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_produce_one_order() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let (a, b) = tokio::join!(
            ctx.orders
                .create_order_from_cart(owner.clone(), checkout_request()),
            ctx.orders
                .create_order_from_cart(owner.clone(), checkout_request()),
        );

        let succeeded = [a.is_ok(), b.is_ok()].into_iter().filter(|ok| *ok).count();

        assert_eq!(succeeded, 1, "exactly one checkout should win");
        assert_eq!(count(&ctx, "orders").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_scoped_to_their_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await?;

        let mine = ctx.orders.list_orders(owner).await?;

        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().map(|o| o.items.len()), Some(1));

        let other = guest("guest-b");

        assert!(ctx.orders.list_orders(other.clone()).await?.is_empty());

        let result = ctx.orders.get_order(other, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        assert_eq!(ctx.orders.list_all_orders().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn any_known_status_can_be_set() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner, checkout_request())
            .await?;

        let mut previous: Timestamp = order.updated_at;

        // Walks backwards through the lifecycle too; transitions are not restricted.
        for literal in ["delivered", "pending", "processing", "cancelled", "shipped"] {
            let updated = ctx.orders.update_order_status(order.uuid, literal).await?;

            assert_eq!(updated.status.as_str(), literal);
            assert_eq!(updated.total_amount, order.total_amount);
            assert!(
                updated.updated_at > previous,
                "updated_at should advance on {literal}"
            );

            previous = updated.updated_at;
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_is_rejected_before_writing() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = guest("guest-a");
        let product = create_product(&ctx, "Mug", "8.00").await?;

        add_item(&ctx, &owner, product.uuid, None, 1).await?;

        let order = ctx
            .orders
            .create_order_from_cart(owner.clone(), checkout_request())
            .await?;

        let result = ctx.orders.update_order_status(order.uuid, "refunded").await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidStatus(ref s)) if s == "refunded"),
            "expected InvalidStatus, got {result:?}"
        );

        let reloaded = ctx.orders.get_order(owner, order.uuid).await?;

        assert_eq!(reloaded.status, OrderStatus::Pending);
        assert_eq!(reloaded.updated_at, order.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_of_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_order_status(OrderUuid::new(), "shipped")
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
