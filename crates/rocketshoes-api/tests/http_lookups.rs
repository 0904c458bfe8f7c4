//! Lookup client against a local stub of the RocketShoes API.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use rocketshoes_api::{ApiError, ClientConfig, HttpLookupClient};
use rocketshoes_core::{CatalogLookup, CoreError, StockLevel, StockLookup};

async fn product(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(json!({
            "id": 1,
            "name": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://cdn.example.com/shoe-1.jpg",
            "brand": "Rocket"
        }))
        .into_response(),
        2 => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        500 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn stock(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(json!({ "id": 1, "amount": 3 })).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn spawn_api() -> String {
    let app = Router::new()
        .route("/products/{id}", get(product))
        .route("/stock/{id}", get(stock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn client() -> HttpLookupClient {
    let base_url = spawn_api().await;
    HttpLookupClient::new(ClientConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_fetches_product_with_extra_fields() {
    let client = client().await;

    let product = client.fetch_product(1).await.unwrap();

    assert_eq!(product.id, 1);
    assert_eq!(product.price(), Some(&json!(179.9)));
    assert_eq!(product.fields.get("brand"), Some(&json!("Rocket")));
}

#[tokio::test]
async fn test_fetches_stock_level() {
    let client = client().await;

    assert_eq!(client.fetch_stock(1).await.unwrap(), StockLevel::new(3));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let client = client().await;

    let err = client.fetch_product(42).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { resource: "products", id: 42 }));

    let err = CatalogLookup::product(&client, 42).await.unwrap_err();
    assert!(matches!(err, CoreError::ProductNotFound(42)));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let client = client().await;

    let err = client.fetch_product(500).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let client = client().await;

    let err = client.fetch_product(2).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_lookup_failure() {
    // Port 9 (discard) on loopback is not served by the stub.
    let client = HttpLookupClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

    let err = StockLookup::stock(&client, 1).await.unwrap_err();
    assert!(matches!(err, CoreError::LookupFailed(_)));
}
