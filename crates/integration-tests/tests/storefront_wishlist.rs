//! Wishlist flow tests: set semantics over the session store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use voltlane_integration_tests::TestClient;

fn toggle_body(product_id: &str) -> serde_json::Value {
    json!({
        "product_id": product_id,
        "name": format!("Product {product_id}"),
        "unit_price": "39.99",
    })
}

#[tokio::test]
async fn test_empty_wishlist() {
    let mut client = TestClient::new();

    let resp = client.get("/wishlist").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["count"], 0);
}

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let mut client = TestClient::new();

    let resp = client
        .post("/wishlist/toggle", toggle_body("roam-powerbank-10k"))
        .await;
    assert_eq!(resp.body["saved"], true);
    assert_eq!(resp.body["count"], 1);

    let resp = client
        .post("/wishlist/toggle", toggle_body("roam-powerbank-10k"))
        .await;
    assert_eq!(resp.body["saved"], false);
    assert_eq!(resp.body["count"], 0);
}

#[tokio::test]
async fn test_wishlist_persists_across_requests() {
    let mut client = TestClient::new();

    client
        .post("/wishlist/toggle", toggle_body("magflow-wireless-pad"))
        .await;
    client
        .post("/wishlist/toggle", toggle_body("duo-car-charger"))
        .await;

    let resp = client.get("/wishlist").await;
    assert_eq!(resp.body["count"], 2);

    let entries = resp.body["entries"].as_array().unwrap();
    let ids: Vec<&str> = entries
        .iter()
        .map(|e| e["product_id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"magflow-wireless-pad"));
    assert!(ids.contains(&"duo-car-charger"));
}
