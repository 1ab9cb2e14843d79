use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::product::ProductResponse;
use super::{check_payload, ExtraFields, MISSING_FIELD};
use crate::entities::{order, product};
use crate::errors::ServiceError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const INVALID_DATE: &str = "Not a valid date.";

fn validate_order_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("date");
            err.message = Some(INVALID_DATE.into());
            err
        })
}

/// Order creation body. `customer_id` presence is checked after field
/// validation so that its absence gets its own message.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct OrderPayload {
    #[serde(default)]
    #[schema(ignore)]
    pub id: Option<i32>,
    #[validate(required, custom = "validate_order_date")]
    #[schema(example = "2024-01-01")]
    pub order_date: Option<String>,
    #[schema(example = 1)]
    pub customer_id: Option<i32>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    pub order_date: NaiveDate,
    pub customer_id: i32,
}

impl OrderPayload {
    pub fn into_fields(self) -> Result<OrderFields, ServiceError> {
        check_payload(self.validate(), &self.extra)?;
        let raw_date = self
            .order_date
            .ok_or_else(|| ServiceError::field("order_date", MISSING_FIELD))?;
        let order_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .map_err(|_| ServiceError::field("order_date", INVALID_DATE))?;
        let customer_id = self
            .customer_id
            .ok_or_else(|| ServiceError::BadRequest("Missing customer_id".to_string()))?;
        Ok(OrderFields {
            order_date,
            customer_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub order_date: NaiveDate,
    #[schema(example = 1)]
    pub customer_id: i32,
    pub products: Vec<ProductResponse>,
}

impl OrderResponse {
    pub fn new(order: order::Model, products: Vec<product::Model>) -> Self {
        Self {
            id: order.id,
            order_date: order.order_date,
            customer_id: order.customer_id,
            products: products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

impl From<(order::Model, Vec<product::Model>)> for OrderResponse {
    fn from((order, products): (order::Model, Vec<product::Model>)) -> Self {
        Self::new(order, products)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCreatedResponse {
    #[schema(example = "New order placed")]
    pub message: String,
    pub order: OrderResponse,
}

impl OrderCreatedResponse {
    pub fn new(order: OrderResponse) -> Self {
        Self {
            message: "New order placed".to_string(),
            order,
        }
    }
}

/// Body of a successful detach: the message plus what is left on the order
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRemovedResponse {
    #[schema(example = "Successfully deleted product 1 from order 1")]
    pub message: String,
    pub order: OrderResponse,
}

impl ProductRemovedResponse {
    pub fn new(product_id: i32, order: OrderResponse) -> Self {
        Self {
            message: format!(
                "Successfully deleted product {} from order {}",
                product_id, order.id
            ),
            order,
        }
    }
}
