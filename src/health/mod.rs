/*!
 * # Health Check Module
 *
 * - Basic health check (`/health`) - database reachability, version and request id
 * - Liveness check (`/health/live`) - the process is up and serving
 */

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db, AppState};

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Body of `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness_check))
}

/// Pings the database; a failed ping reports 503 with status `down`
#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    responses(
        (status = 200, description = "Service and database are up", body = HealthInfo),
        (status = 503, description = "Database unreachable", body = HealthInfo),
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => HealthStatus::Up,
        Err(_) => HealthStatus::Down,
    };
    let status_code = if database == HealthStatus::Up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let info = HealthInfo {
        status: database.clone(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        request_id: crate::tracing::current_request_id().map(|rid| rid.to_string()),
    };

    (status_code, Json(info))
}

#[utoipa::path(
    get,
    path = "/health/live",
    summary = "Liveness check",
    responses((status = 200, description = "Process is alive")),
    tag = "health"
)]
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": HealthStatus::Up })))
}
