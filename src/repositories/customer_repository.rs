use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::dto::customer::CustomerFields;
use crate::entities::customer::{
    ActiveModel as CustomerActiveModel, Column, Entity as Customer, Model as CustomerModel,
};
use crate::entities::order::{self, Entity as Order};
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for customer rows
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<CustomerModel>, DbErr> {
        Customer::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, DbErr> {
        Customer::find_by_id(id).one(self.base.get_db()).await
    }

    pub async fn insert(&self, fields: CustomerFields) -> Result<CustomerModel, DbErr> {
        CustomerActiveModel {
            name: Set(fields.name),
            email: Set(fields.email),
            address: Set(fields.address),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
    }

    /// Overwrites every mutable column of an existing customer
    pub async fn replace(
        &self,
        existing: CustomerModel,
        fields: CustomerFields,
    ) -> Result<CustomerModel, DbErr> {
        let mut active: CustomerActiveModel = existing.into();
        active.name = Set(fields.name);
        active.email = Set(fields.email);
        active.address = Set(fields.address);
        active.update(self.base.get_db()).await
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = Customer::delete_by_id(id).exec(self.base.get_db()).await?;
        Ok(result.rows_affected)
    }

    /// Number of orders still pointing at the customer
    pub async fn count_orders(&self, id: i32) -> Result<u64, DbErr> {
        Order::find()
            .filter(order::Column::CustomerId.eq(id))
            .count(self.base.get_db())
            .await
    }
}
