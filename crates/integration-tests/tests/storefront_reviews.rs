//! Review API tests against the seeded in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use voltlane_integration_tests::{TestClient, storefront_app};

#[tokio::test]
async fn test_seeded_product_has_reviews() {
    let mut client = TestClient::new();

    let resp = client.get("/products/volt-65w-gan-charger/reviews").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.success());

    let count = resp.body["count"].as_u64().unwrap();
    assert!(count >= 3, "seeded products carry at least 3 reviews");
    assert_eq!(resp.body["reviews"].as_array().unwrap().len() as u64, count);

    let average = resp.body["average"].as_f64().unwrap();
    assert!((1.0..=5.0).contains(&average));
}

#[tokio::test]
async fn test_unknown_product_defaults_to_five() {
    let mut client = TestClient::new();

    let resp = client.get("/products/not-a-product/reviews").await;
    assert_eq!(resp.body["count"], 0);
    assert_eq!(resp.body["average"].as_f64().unwrap(), 5.0);
}

#[tokio::test]
async fn test_submit_review_appears_in_listing() {
    // One app so both requests see the same store
    let app = storefront_app();
    let mut client = TestClient::with_app(app);

    let before = client.get("/products/braid-usbc-cable/reviews").await;
    let before_count = before.body["count"].as_u64().unwrap();

    let resp = client
        .post(
            "/products/braid-usbc-cable/reviews",
            json!({
                "user_name": "Sasha",
                "rating": 4,
                "comment": "Holds up well in a backpack.",
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["review"]["verified"], false);

    let after = client.get("/products/braid-usbc-cable/reviews").await;
    assert_eq!(after.body["count"].as_u64().unwrap(), before_count + 1);
}

#[tokio::test]
async fn test_submit_review_rejects_out_of_range_rating() {
    let mut client = TestClient::new();

    let resp = client
        .post(
            "/products/braid-usbc-cable/reviews",
            json!({ "user_name": "Sasha", "rating": 6, "comment": "" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(!resp.success());
}

#[tokio::test]
async fn test_submit_review_rejects_blank_name() {
    let mut client = TestClient::new();

    let resp = client
        .post(
            "/products/braid-usbc-cable/reviews",
            json!({ "user_name": "  ", "rating": 4, "comment": "fine" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error(), "Name is required");
}
