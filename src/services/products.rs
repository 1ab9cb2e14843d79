use std::sync::Arc;

use tracing::{error, info, instrument};

use super::invalid_id;
use crate::{
    db::DbPool,
    dto::product::ProductPayload,
    entities::{product, Identifiable},
    errors::ServiceError,
    repositories::ProductRepository,
};

/// Service for managing products
#[derive(Clone, Debug)]
pub struct ProductService {
    products: ProductRepository,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            products: ProductRepository::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(self.products.find_all().await?)
    }

    #[instrument(skip(self), fields(product_id = id))]
    pub async fn get_product(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(invalid_id::<product::Model>)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_product(
        &self,
        payload: ProductPayload,
    ) -> Result<product::Model, ServiceError> {
        let fields = payload.into_fields()?;
        let created = self.products.insert(fields).await.map_err(|e| {
            error!("Failed to create product: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(product_id = created.id(), "Product created");
        Ok(created)
    }

    #[instrument(skip(self, payload), fields(product_id = id))]
    pub async fn update_product(
        &self,
        id: i32,
        payload: ProductPayload,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get_product(id).await?;
        let fields = payload.into_fields()?;

        let updated = self.products.replace(existing, fields).await.map_err(|e| {
            error!(product_id = id, "Failed to update product: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(product_id = id, "Product updated");
        Ok(updated)
    }

    /// Deletes the product and detaches it from every order in the same commit
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        self.get_product(id).await?;

        self.products
            .delete_with_associations(id)
            .await
            .map_err(|e| {
                error!(product_id = id, "Failed to delete product: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        info!(product_id = id, "Product deleted");
        Ok(())
    }
}
