//! Product endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn create_list_and_get_product() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/products",
            Some(json!({"product_name": "Widget", "price": 9.99})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New product added");
    assert_eq!(
        body["product"],
        json!({"id": 1, "product_name": "Widget", "price": 9.99})
    );

    let (status, body) = app.call(Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app.call(Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_name"], "Widget");
}

#[tokio::test]
async fn negative_and_zero_prices_are_accepted() {
    let app = TestApp::new().await;
    app.create_product("free sample", 0.0).await;
    app.create_product("store credit", -5.0).await;

    let (_, body) = app.call(Method::GET, "/products", None).await;
    let prices: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![0.0, -5.0]);
}

#[tokio::test]
async fn missing_price_is_a_field_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::POST, "/products", Some(json!({"product_name": "Widget"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["price"][0], "Missing data for required field.");
    assert!(body["field_errors"].get("product_name").is_none());
}

#[tokio::test]
async fn update_unknown_product_is_invalid_id() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::PUT,
            "/products/3",
            Some(json!({"product_name": "Gadget", "price": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product id");
}

#[tokio::test]
async fn update_replaces_name_and_price() {
    let app = TestApp::new().await;
    let id = app.create_product("Widget", 9.99).await;

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/products/{id}"),
            Some(json!({"product_name": "Widget v2", "price": 12.5})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "product_name": "Widget v2", "price": 12.5})
    );
}

#[tokio::test]
async fn deleting_a_product_removes_it_from_orders() {
    let app = TestApp::new().await;
    let customer = app.create_customer("alice").await;
    let order = app.create_order(customer).await;
    let product = app.create_product("Widget", 9.99).await;

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/orders/{order}/add_product/{product}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(Method::DELETE, &format!("/products/{product}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Successfully deleted product {product}"));

    let (status, body) = app
        .call(Method::GET, &format!("/orders/{order}/products"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = app
        .call(Method::DELETE, &format!("/products/{product}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product id");
}
