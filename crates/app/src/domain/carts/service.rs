//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{NewCartItem, is_valid_quantity},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        owners::Owner,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    /// The owner's active cart, locked until `tx` ends, inserting one first if needed.
    ///
    /// A concurrent insert for the same owner loses against the partial unique index and
    /// the follow-up read returns the winner's cart. A checkout that converts the cart
    /// while this waits on the lock makes the read come back empty, so a fresh cart is
    /// created instead of writing into the converted one.
    async fn ensure_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
    ) -> Result<CartRecord, CartsServiceError> {
        if let Some(cart) = self.carts_repository.lock_active_cart(tx, owner).await? {
            return Ok(cart);
        }

        let inserted = self
            .carts_repository
            .create_active_cart(tx, CartUuid::new(), owner)
            .await?;

        if inserted > 0 {
            tracing::debug!(%owner, "created cart");
        }

        self.carts_repository
            .lock_active_cart(tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    /// The owner's active cart, locked until `tx` ends. Item writes go through this so
    /// they serialise with checkout and never land in a converted cart.
    async fn require_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository
            .lock_active_cart(tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: Owner) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(mut cart) = self.carts_repository.get_active_cart(&mut tx, &owner).await? else {
            return Ok(None);
        };

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(Some(cart))
    }

    async fn get_or_create_cart(&self, owner: Owner) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.ensure_active_cart(&mut tx, &owner).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn add_item(
        &self,
        owner: Owner,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if !is_valid_quantity(item.quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.ensure_active_cart(&mut tx, &owner).await?;

        let existing = self
            .items_repository
            .get_line_quantity(&mut tx, cart.uuid, &item)
            .await?
            .unwrap_or(0);

        if !is_valid_quantity(existing.saturating_add(item.quantity)) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let item_uuid = self
            .items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let item = self
            .items_repository
            .get_cart_item(&mut tx, cart.uuid, item_uuid)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        owner: Owner,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if !is_valid_quantity(quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.require_active_cart(&mut tx, &owner).await?;

        let rows_affected = self
            .items_repository
            .update_cart_item(&mut tx, cart.uuid, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let item = self
            .items_repository
            .get_cart_item(&mut tx, cart.uuid, item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(&self, owner: Owner, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.require_active_cart(&mut tx, &owner).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, owner: Owner) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.require_active_cart(&mut tx, &owner).await?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The owner's active cart with its items, if one exists.
    async fn get_cart(&self, owner: Owner) -> Result<Option<CartRecord>, CartsServiceError>;

    /// The owner's active cart, created empty if none exists.
    async fn get_or_create_cart(&self, owner: Owner) -> Result<CartRecord, CartsServiceError>;

    /// Add a product (or one of its variants) to the owner's cart.
    ///
    /// Re-adding the same product and variant increments the existing line.
    async fn add_item(
        &self,
        owner: Owner,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Overwrite the quantity of a line in the owner's active cart.
    async fn update_item(
        &self,
        owner: Owner,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a line from the owner's active cart.
    async fn remove_item(&self, owner: Owner, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Remove every line from the owner's active cart.
    async fn clear_cart(&self, owner: Owner) -> Result<(), CartsServiceError>;
}
