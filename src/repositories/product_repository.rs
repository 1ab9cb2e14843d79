use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use crate::dto::product::ProductFields;
use crate::entities::order_product::{self, Entity as OrderProduct};
use crate::entities::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for product rows
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<ProductModel>, DbErr> {
        Product::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, DbErr> {
        Product::find_by_id(id).one(self.base.get_db()).await
    }

    pub async fn insert(&self, fields: ProductFields) -> Result<ProductModel, DbErr> {
        ProductActiveModel {
            product_name: Set(fields.product_name),
            price: Set(fields.price),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
    }

    pub async fn replace(
        &self,
        existing: ProductModel,
        fields: ProductFields,
    ) -> Result<ProductModel, DbErr> {
        let mut active: ProductActiveModel = existing.into();
        active.product_name = Set(fields.product_name);
        active.price = Set(fields.price);
        active.update(self.base.get_db()).await
    }

    /// Deletes the product and every association row naming it in one transaction
    pub async fn delete_with_associations(&self, id: i32) -> Result<u64, DbErr> {
        let txn = self.base.get_db().begin().await?;

        OrderProduct::delete_many()
            .filter(order_product::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        let result = Product::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
