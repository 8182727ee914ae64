//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        money::is_valid_amount,
        products::{
            data::{NewProduct, NewVariant, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid, VariantRecord},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_name(&product.name)?;
        validate_price(product.price)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_name(&update.name)?;
        validate_price(update.price)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<VariantRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // Distinguish "no variants" from "no product".
        self.repository.get_product(&mut tx, product).await?;

        let variants = self.repository.list_variants(&mut tx, product).await?;

        tx.commit().await?;

        Ok(variants)
    }

    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, ProductsServiceError> {
        validate_name(&variant.name)?;

        if let Some(price) = variant.price {
            validate_price(price)?;
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_variant(&mut tx, product, variant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products still on sale.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with the given UUID, name and price.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's name and price. Existing orders keep their snapshot.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product and its variants.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Lists a product's variants.
    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<VariantRecord>, ProductsServiceError>;

    /// Adds a variant to a product.
    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, ProductsServiceError>;
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    if name.trim().is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    Ok(())
}

fn validate_price(price: rust_decimal::Decimal) -> Result<(), ProductsServiceError> {
    if !is_valid_amount(price) {
        return Err(ProductsServiceError::InvalidPrice);
    }

    Ok(())
}
