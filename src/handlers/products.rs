use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{created_response, success_response, JsonPayload};
use crate::{
    dto::{
        product::{ProductCreatedResponse, ProductPayload, ProductResponse},
        MessageResponse,
    },
    entities::product,
    errors::ServiceError,
    AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    post,
    path = "/products",
    summary = "Create product",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductCreatedResponse),
        (status = 400, description = "Validation errors", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<ProductPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.products.create_product(payload).await?;
    Ok(created_response(ProductCreatedResponse::new(created.into())))
}

#[utoipa::path(
    get,
    path = "/products",
    summary = "List products",
    responses((status = 200, description = "All products", body = [ProductResponse])),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ServiceError> {
    let products = state.services.products.list_products().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    summary = "Get product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Invalid product id", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ServiceError> {
    let product = state.services.products.get_product(id).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    summary = "Replace product",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid product id or validation errors", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonPayload(payload): JsonPayload<ProductPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.products.update_product(id, payload).await?;
    Ok(success_response(ProductResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    summary = "Delete product",
    description = "Deletes the product and removes it from every order",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Invalid product id", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.products.delete_product(id).await?;
    Ok(success_response(MessageResponse::deleted::<product::Model>(id)))
}
