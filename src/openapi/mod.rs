use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{dto, errors, handlers, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "E-commerce API",
        version = "0.1.0",
        description = r#"
# E-commerce API

CRUD endpoints for customers, products and orders, plus management of the
products attached to each order.

## Error Handling

Every client-caused failure, whatever its kind, is answered with `400` and the same body:

```json
{
  "error": "Bad Request",
  "message": "Item is already included in order",
  "request_id": "0f8f0c4e-6c2b-4b8a-9a55-0d2f5c3c1b7e",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Rejected payloads add a `field_errors` object mapping each field to its messages.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "customers", description = "Customer management endpoints"),
        (name = "products", description = "Product catalogue endpoints"),
        (name = "orders", description = "Orders and their attached products"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::delete_order,
        handlers::orders::add_product,
        handlers::orders::remove_product,
        handlers::orders::list_customer_orders,
        handlers::orders::list_order_products,
        health::health_check,
        health::liveness_check,
    ),
    components(
        schemas(
            dto::MessageResponse,
            dto::customer::CustomerPayload,
            dto::customer::CustomerResponse,
            dto::customer::CustomerCreatedResponse,
            dto::product::ProductPayload,
            dto::product::ProductResponse,
            dto::product::ProductCreatedResponse,
            dto::order::OrderPayload,
            dto::order::OrderResponse,
            dto::order::OrderCreatedResponse,
            dto::order::ProductRemovedResponse,
            errors::ErrorResponse,
            health::HealthInfo,
            health::HealthStatus,
        )
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, serving the generated document at `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/customers",
            "/customers/{id}",
            "/products",
            "/products/{id}",
            "/orders",
            "/orders/{order_id}",
            "/orders/{order_id}/products",
            "/orders/{order_id}/add_product/{product_id}",
            "/orders/{order_id}/remove_product/{product_id}",
            "/orders/customer/{customer_id}",
            "/health",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
