pub mod customers;
pub mod orders;
pub mod products;

pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

use crate::entities::Identifiable;
use crate::errors::ServiceError;

/// `Invalid customer id`, `Invalid product id`, ...
pub(crate) fn invalid_id<T: Identifiable>() -> ServiceError {
    ServiceError::InvalidId(format!("Invalid {} id", T::RESOURCE))
}
