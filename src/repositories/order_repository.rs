use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use crate::dto::order::OrderFields;
use crate::entities::order::{
    ActiveModel as OrderActiveModel, Column, Entity as Order, Model as OrderModel,
};
use crate::entities::order_product::{self, Entity as OrderProduct};
use crate::entities::product::{self, Entity as Product, Model as ProductModel};
use crate::repositories::Repository;

use super::BaseRepository;

/// An order together with the products currently attached to it
pub type OrderWithProducts = (OrderModel, Vec<ProductModel>);

/// Repository for orders and their product associations
#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, DbErr> {
        Order::find_by_id(id).one(self.base.get_db()).await
    }

    /// All orders with their products. Rows come back ordered by order id so
    /// the join can be folded per order.
    pub async fn find_all_with_products(&self) -> Result<Vec<OrderWithProducts>, DbErr> {
        Order::find()
            .find_with_related(Product)
            .order_by_asc(Column::Id)
            .order_by_asc(product::Column::Id)
            .all(self.base.get_db())
            .await
    }

    pub async fn find_by_customer_with_products(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderWithProducts>, DbErr> {
        Order::find()
            .filter(Column::CustomerId.eq(customer_id))
            .find_with_related(Product)
            .order_by_asc(Column::Id)
            .order_by_asc(product::Column::Id)
            .all(self.base.get_db())
            .await
    }

    /// Products attached to `order`, through the association table
    pub async fn products_of(&self, order: &OrderModel) -> Result<Vec<ProductModel>, DbErr> {
        order
            .find_related(Product)
            .order_by_asc(product::Column::Id)
            .all(self.base.get_db())
            .await
    }

    pub async fn insert(&self, fields: OrderFields) -> Result<OrderModel, DbErr> {
        OrderActiveModel {
            order_date: Set(fields.order_date),
            customer_id: Set(fields.customer_id),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
    }

    pub async fn is_attached(&self, order_id: i32, product_id: i32) -> Result<bool, DbErr> {
        let row = OrderProduct::find_by_id((order_id, product_id))
            .one(self.base.get_db())
            .await?;
        Ok(row.is_some())
    }

    /// Inserts the association row. A pair that is already present is
    /// rejected by the table's primary key.
    pub async fn attach(&self, order_id: i32, product_id: i32) -> Result<(), DbErr> {
        let row = order_product::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(product_id),
        };
        OrderProduct::insert(row)
            .exec_without_returning(self.base.get_db())
            .await?;
        Ok(())
    }

    /// Removes the association row, returning how many rows went away
    pub async fn detach(&self, order_id: i32, product_id: i32) -> Result<u64, DbErr> {
        let result = OrderProduct::delete_many()
            .filter(order_product::Column::OrderId.eq(order_id))
            .filter(order_product::Column::ProductId.eq(product_id))
            .exec(self.base.get_db())
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes the order and its association rows in one transaction
    pub async fn delete_with_associations(&self, id: i32) -> Result<u64, DbErr> {
        let txn = self.base.get_db().begin().await?;

        OrderProduct::delete_many()
            .filter(order_product::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        let result = Order::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
