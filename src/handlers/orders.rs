use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, put},
    Json, Router,
};

use super::common::{created_response, success_response, JsonPayload};
use crate::{
    dto::{
        order::{OrderCreatedResponse, OrderPayload, OrderResponse, ProductRemovedResponse},
        product::ProductResponse,
        MessageResponse,
    },
    entities::order,
    errors::ServiceError,
    AppState,
};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/customer/:customer_id", get(list_customer_orders))
        .route("/:order_id", get(get_order).delete(delete_order))
        .route("/:order_id/products", get(list_order_products))
        .route("/:order_id/add_product/:product_id", put(add_product))
        .route("/:order_id/remove_product/:product_id", delete(remove_product))
}

#[utoipa::path(
    post,
    path = "/orders",
    summary = "Create order",
    description = "Creates an order for an existing customer with no products attached",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created", body = OrderCreatedResponse),
        (status = 400, description = "Missing or invalid customer id, or validation errors", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<OrderPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.orders.create_order(payload).await?;
    Ok(created_response(OrderCreatedResponse::new(created.into())))
}

#[utoipa::path(
    get,
    path = "/orders",
    summary = "List orders",
    responses((status = 200, description = "All orders with their products", body = [OrderResponse])),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ServiceError> {
    let orders = state.services.orders.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    summary = "Get order",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its products", body = OrderResponse),
        (status = 400, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<OrderResponse>, ServiceError> {
    let order = state.services.orders.get_order(order_id).await?;
    Ok(Json(order.into()))
}

#[utoipa::path(
    delete,
    path = "/orders/{order_id}",
    summary = "Delete order",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 400, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.delete_order(order_id).await?;
    Ok(success_response(MessageResponse::deleted::<order::Model>(order_id)))
}

#[utoipa::path(
    put,
    path = "/orders/{order_id}/add_product/{product_id}",
    summary = "Attach product",
    params(
        ("order_id" = i32, Path, description = "Order id"),
        ("product_id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product attached", body = MessageResponse),
        (status = 400, description = "Invalid ids or product already attached", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .orders
        .add_product(order_id, product_id)
        .await?;
    Ok(success_response(MessageResponse::new(
        "Successfully added item to order",
    )))
}

#[utoipa::path(
    delete,
    path = "/orders/{order_id}/remove_product/{product_id}",
    summary = "Detach product",
    params(
        ("order_id" = i32, Path, description = "Order id"),
        ("product_id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product detached; updated order returned", body = ProductRemovedResponse),
        (status = 400, description = "Invalid ids or product not attached", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .remove_product(order_id, product_id)
        .await?;
    Ok(success_response(ProductRemovedResponse::new(
        product_id,
        order.into(),
    )))
}

#[utoipa::path(
    get,
    path = "/orders/customer/{customer_id}",
    summary = "List a customer's orders",
    params(("customer_id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders placed by the customer", body = [OrderResponse]),
        (status = 400, description = "No orders found for this customer", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<OrderResponse>>, ServiceError> {
    let orders = state
        .services
        .orders
        .list_customer_orders(customer_id)
        .await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}/products",
    summary = "List products of an order",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Products attached to the order", body = [ProductResponse]),
        (status = 400, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_order_products(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<Vec<ProductResponse>>, ServiceError> {
    let products = state
        .services
        .orders
        .list_order_products(order_id)
        .await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}
