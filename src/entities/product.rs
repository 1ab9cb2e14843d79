use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProduct,
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProduct.def()
    }
}

// Orders reach products through the association table
impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_product::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_product::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
