use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{check_payload, validate_text_len, ExtraFields, MISSING_FIELD};
use crate::entities::product;
use crate::errors::ServiceError;

/// Product body for both create and full-replace update.
/// Any numeric price is accepted, zero and negative included.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[serde(default)]
    #[schema(ignore)]
    pub id: Option<i32>,
    #[validate(required, custom = "validate_text_len")]
    #[schema(example = "Widget")]
    pub product_name: Option<String>,
    #[validate(required)]
    #[schema(example = 9.99)]
    pub price: Option<f64>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: ExtraFields,
}

/// Validated product columns
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub product_name: String,
    pub price: f64,
}

impl ProductPayload {
    pub fn into_fields(self) -> Result<ProductFields, ServiceError> {
        check_payload(self.validate(), &self.extra)?;
        let product_name = self
            .product_name
            .ok_or_else(|| ServiceError::field("product_name", MISSING_FIELD))?;
        let price = self
            .price
            .ok_or_else(|| ServiceError::field("price", MISSING_FIELD))?;
        Ok(ProductFields {
            product_name,
            price,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Widget")]
    pub product_name: String,
    #[schema(example = 9.99)]
    pub price: f64,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            product_name: model.product_name,
            price: model.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductCreatedResponse {
    #[schema(example = "New product added")]
    pub message: String,
    pub product: ProductResponse,
}

impl ProductCreatedResponse {
    pub fn new(product: ProductResponse) -> Self {
        Self {
            message: "New product added".to_string(),
            product,
        }
    }
}
