use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{created_response, success_response, JsonPayload};
use crate::{
    dto::{
        customer::{CustomerCreatedResponse, CustomerPayload, CustomerResponse},
        MessageResponse,
    },
    entities::customer,
    errors::ServiceError,
    AppState,
};

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    post,
    path = "/customers",
    summary = "Create customer",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = CustomerCreatedResponse,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Validation errors", body = crate::errors::ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<CustomerPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.customers.create_customer(payload).await?;
    Ok(created_response(CustomerCreatedResponse::new(created.into())))
}

#[utoipa::path(
    get,
    path = "/customers",
    summary = "List customers",
    responses(
        (status = 200, description = "All customers", body = [CustomerResponse]),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    summary = "Get customer",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer", body = CustomerResponse),
        (status = 400, description = "Invalid customer id", body = crate::errors::ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, ServiceError> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(customer.into()))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    summary = "Replace customer",
    description = "Overwrites name, email and address; omitted optional fields become null",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Updated customer", body = CustomerResponse),
        (status = 400, description = "Invalid customer id or validation errors", body = crate::errors::ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonPayload(payload): JsonPayload<CustomerPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .customers
        .update_customer(id, payload)
        .await?;
    Ok(success_response(CustomerResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    summary = "Delete customer",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted", body = MessageResponse),
        (status = 400, description = "Invalid customer id or customer still has orders", body = crate::errors::ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete_customer(id).await?;
    Ok(success_response(MessageResponse::deleted::<customer::Model>(id)))
}
