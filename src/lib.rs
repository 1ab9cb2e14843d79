//! E-commerce API Library
//!
//! Customers, products and orders over HTTP/JSON, with the products of each
//! order managed through an association table.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<config::AppConfig>,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config: Arc::new(config),
            services,
        }
    }
}

/// Resource routes: customers, products and orders
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/orders", handlers::orders::order_routes())
}

/// CORS from config: explicit origins when given, permissive when allowed,
/// otherwise same-origin only.
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        CorsLayer::permissive()
    } else {
        ::tracing::warn!("No CORS origins configured; cross-origin requests will be refused");
        CorsLayer::new()
    }
}

/// Full application router: home, health, resources, Swagger UI and the
/// request-scoped layers.
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_body_size;

    Router::new()
        .route("/", get(|| async { "Home" }))
        .nest("/health", health::health_routes())
        .merge(api_routes())
        .merge(openapi::swagger_ui())
        .layer(DefaultBodyLimit::max(body_limit))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}
