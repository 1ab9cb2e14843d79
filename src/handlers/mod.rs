pub mod common;
pub mod customers;
pub mod orders;
pub mod products;

use crate::{
    db::DbPool,
    services::{CustomerService, OrderService, ProductService},
};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone, Debug)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub products: Arc<ProductService>,
    pub orders: Arc<OrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(db_pool.clone())),
            orders: Arc::new(OrderService::new(db_pool)),
        }
    }
}
