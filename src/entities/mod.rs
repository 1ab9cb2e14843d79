pub mod customer;
pub mod order;
pub mod order_product;
pub mod product;

/// Shared capability of every table-backed resource: a resource name and an
/// integer identity assigned by the store.
pub trait Identifiable {
    /// Singular resource name used in log fields and response messages
    const RESOURCE: &'static str;

    fn id(&self) -> i32;
}

impl Identifiable for customer::Model {
    const RESOURCE: &'static str = "customer";

    fn id(&self) -> i32 {
        self.id
    }
}

impl Identifiable for product::Model {
    const RESOURCE: &'static str = "product";

    fn id(&self) -> i32 {
        self.id
    }
}

impl Identifiable for order::Model {
    const RESOURCE: &'static str = "order";

    fn id(&self) -> i32 {
        self.id
    }
}
