use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::invalid_id;
use crate::{
    db::DbPool,
    dto::customer::CustomerPayload,
    entities::{customer, Identifiable},
    errors::ServiceError,
    repositories::CustomerRepository,
};

/// Service for managing customers
#[derive(Clone, Debug)]
pub struct CustomerService {
    customers: CustomerRepository,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: CustomerRepository::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        Ok(self.customers.find_all().await?)
    }

    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn get_customer(&self, id: i32) -> Result<customer::Model, ServiceError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(invalid_id::<customer::Model>)
    }

    /// Creates a new customer
    #[instrument(skip(self, payload))]
    pub async fn create_customer(
        &self,
        payload: CustomerPayload,
    ) -> Result<customer::Model, ServiceError> {
        let fields = payload.into_fields()?;
        let created = self.customers.insert(fields).await.map_err(|e| {
            error!("Failed to create customer: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(customer_id = created.id(), "Customer created");
        Ok(created)
    }

    /// Replaces name, email and address of an existing customer.
    /// The id is checked before the payload is validated.
    #[instrument(skip(self, payload), fields(customer_id = id))]
    pub async fn update_customer(
        &self,
        id: i32,
        payload: CustomerPayload,
    ) -> Result<customer::Model, ServiceError> {
        let existing = self.get_customer(id).await?;
        let fields = payload.into_fields()?;

        let updated = self.customers.replace(existing, fields).await.map_err(|e| {
            error!(customer_id = id, "Failed to update customer: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(customer_id = id, "Customer updated");
        Ok(updated)
    }

    /// Deletes a customer that has no orders left
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        self.get_customer(id).await?;

        let open_orders = self.customers.count_orders(id).await?;
        if open_orders > 0 {
            warn!(customer_id = id, open_orders, "Refusing to delete customer with orders");
            return Err(ServiceError::Conflict(format!(
                "Customer {} still has orders",
                id
            )));
        }

        self.customers.delete(id).await.map_err(|e| {
            error!(customer_id = id, "Failed to delete customer: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}
