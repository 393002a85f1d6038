//! HTTP client tests against an in-process server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use axum::{http::StatusCode, routing::get, Json, Router};
use cart_store::{
    cart_store, load_cart, CartClient, CartConfig, CartError, HttpCartClient, ItemId,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

async fn cart_json() -> Json<Value> {
    Json(json!([
        {
            "id": "rec1JZlfCIBOPdcT2",
            "title": "Samsung Galaxy S8",
            "price": "399.99",
            "img": "https://example.com/phone-1.png",
            "amount": 1
        },
        {
            "id": 2,
            "title": "Google Pixel",
            "price": 499.99,
            "amount": 2,
            "color": "black"
        }
    ]))
}

/// Serve the test routes on an ephemeral port and return the base URL
async fn serve() -> String {
    let router = Router::new()
        .route("/cart", get(cart_json))
        .route("/broken", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/garbage", get(|| async { "definitely not json" }))
        .route("/object", get(|| async { Json(json!({ "items": [] })) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn decodes_remote_cart_shape() {
    let base = serve().await;
    let client = HttpCartClient::new(format!("{base}/cart"));

    let items = assert_ok!(client.get_items().await);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ItemId::new("rec1JZlfCIBOPdcT2"));
    assert!((items[0].price - 399.99).abs() < 1e-9);
    assert_eq!(items[1].id, ItemId::new("2"));
    assert_eq!(items[1].amount, 2);
    assert_eq!(items[1].extra.get("color"), Some(&Value::from("black")));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let base = serve().await;

    let error = assert_err!(HttpCartClient::new(format!("{base}/broken")).get_items().await);
    assert!(matches!(error, CartError::Status { status: 500 }));

    let error = assert_err!(HttpCartClient::new(format!("{base}/missing")).get_items().await);
    assert!(matches!(error, CartError::Status { status: 404 }));
}

#[tokio::test]
async fn malformed_bodies_map_to_decode() {
    let base = serve().await;

    for path in ["garbage", "object"] {
        let client = HttpCartClient::new(format!("{base}/{path}"));
        let error = assert_err!(client.fetch_cart_items().await);
        assert!(matches!(error, CartError::Decode(_)), "{path}: {error:?}");
    }
}

#[tokio::test]
async fn refused_connection_maps_to_request() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = assert_err!(HttpCartClient::new(format!("http://{addr}/cart")).get_items().await);
    assert!(matches!(error, CartError::Request(_)));
}

#[tokio::test]
async fn configured_timeout_cuts_slow_requests() {
    let base = serve().await;
    let config = CartConfig {
        api_url: format!("{base}/slow"),
        request_timeout_secs: 1,
        ..CartConfig::default()
    };

    let client = assert_ok!(HttpCartClient::from_config(&config));
    assert_eq!(client.url(), config.api_url);

    let error = assert_err!(client.get_items().await);
    assert!(matches!(error, CartError::Request(_)));
}

#[tokio::test]
async fn store_loads_through_http() {
    let base = serve().await;
    let store = cart_store(Arc::new(HttpCartClient::new(format!("{base}/cart"))));

    let items = assert_ok!(load_cart(&store, Duration::from_secs(5)).await);
    assert_eq!(items.len(), 2);

    let (loading, count) = store.state(|s| (s.is_loading, s.len())).await;
    assert!(!loading);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn store_rejects_when_http_fails() {
    let base = serve().await;
    let store = cart_store(Arc::new(HttpCartClient::new(format!("{base}/broken"))));

    let error = assert_err!(load_cart(&store, Duration::from_secs(5)).await);
    assert!(matches!(error, CartError::LoadRejected(_)));
    assert!(!store.state(|s| s.is_loading).await);
}
