use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::invalid_id;
use crate::{
    db::DbPool,
    dto::order::OrderPayload,
    entities::{customer, product, Identifiable},
    errors::ServiceError,
    repositories::{CustomerRepository, OrderRepository, OrderWithProducts, ProductRepository},
};

const ORDER_NOT_FOUND: &str = "Order not found";
const INVALID_PAIR: &str = "Invalid order id or product id";
const ALREADY_INCLUDED: &str = "Item is already included in order";
const NOT_IN_ORDER: &str = "Item is not in order";

/// Orders and the order/product association lifecycle
#[derive(Clone, Debug)]
pub struct OrderService {
    orders: OrderRepository,
    customers: CustomerRepository,
    products: ProductRepository,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            orders: OrderRepository::new(db_pool.clone()),
            customers: CustomerRepository::new(db_pool.clone()),
            products: ProductRepository::new(db_pool),
        }
    }

    /// Creates an order with no products. The customer must exist before
    /// anything is written.
    #[instrument(skip(self, payload))]
    pub async fn create_order(
        &self,
        payload: OrderPayload,
    ) -> Result<OrderWithProducts, ServiceError> {
        let fields = payload.into_fields()?;

        if self.customers.find_by_id(fields.customer_id).await?.is_none() {
            warn!(customer_id = fields.customer_id, "Order rejected for unknown customer");
            return Err(invalid_id::<customer::Model>());
        }

        let created = self.orders.insert(fields).await.map_err(|e| {
            error!("Failed to create order: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(
            order_id = created.id(),
            customer_id = created.customer_id,
            "Order created"
        );
        Ok((created, Vec::new()))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderWithProducts>, ServiceError> {
        Ok(self.orders.find_all_with_products().await?)
    }

    #[instrument(skip(self), fields(order_id = id))]
    pub async fn get_order(&self, id: i32) -> Result<OrderWithProducts, ServiceError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_FOUND.to_string()))?;
        let products = self.orders.products_of(&order).await?;
        Ok((order, products))
    }

    /// Deletes the order together with its association rows
    #[instrument(skip(self), fields(order_id = id))]
    pub async fn delete_order(&self, id: i32) -> Result<(), ServiceError> {
        if self.orders.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(ORDER_NOT_FOUND.to_string()));
        }

        self.orders.delete_with_associations(id).await.map_err(|e| {
            error!(order_id = id, "Failed to delete order: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(order_id = id, "Order deleted");
        Ok(())
    }

    /// Both ids must name existing rows; the two causes share one message.
    async fn ensure_pair_exists(&self, order_id: i32, product_id: i32) -> Result<(), ServiceError> {
        let order = self.orders.find_by_id(order_id).await?;
        let product = self.products.find_by_id(product_id).await?;
        match (order, product) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(ServiceError::InvalidId(INVALID_PAIR.to_string())),
        }
    }

    /// Attaches a product to an order. Attaching the same product twice is an error.
    #[instrument(skip(self), fields(order_id = order_id, product_id = product_id))]
    pub async fn add_product(&self, order_id: i32, product_id: i32) -> Result<(), ServiceError> {
        self.ensure_pair_exists(order_id, product_id).await?;

        if self.orders.is_attached(order_id, product_id).await? {
            return Err(ServiceError::Conflict(ALREADY_INCLUDED.to_string()));
        }

        // A concurrent attach can pass the check above; the composite key catches it
        self.orders
            .attach(order_id, product_id)
            .await
            .map_err(|e| ServiceError::from_write(e, ALREADY_INCLUDED))?;

        info!(order_id, product_id, "Product added to order");
        Ok(())
    }

    /// Detaches a product and returns the order with what is left on it
    #[instrument(skip(self), fields(order_id = order_id, product_id = product_id))]
    pub async fn remove_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<OrderWithProducts, ServiceError> {
        self.ensure_pair_exists(order_id, product_id).await?;

        let removed = self.orders.detach(order_id, product_id).await.map_err(|e| {
            error!(order_id, product_id, "Failed to remove product from order: {}", e);
            ServiceError::DatabaseError(e)
        })?;
        if removed == 0 {
            return Err(ServiceError::Conflict(NOT_IN_ORDER.to_string()));
        }

        info!(order_id, product_id, "Product removed from order");
        self.get_order(order_id).await
    }

    /// Orders placed by a customer. No orders at all is reported as an error.
    #[instrument(skip(self), fields(customer_id = customer_id))]
    pub async fn list_customer_orders(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderWithProducts>, ServiceError> {
        let orders = self
            .orders
            .find_by_customer_with_products(customer_id)
            .await?;
        if orders.is_empty() {
            return Err(ServiceError::NotFound(
                "No orders found for this customer".to_string(),
            ));
        }
        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = order_id))]
    pub async fn list_order_products(
        &self,
        order_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let (_, products) = self.get_order(order_id).await?;
        Ok(products)
    }
}
