//! Newsletter validation tests.
//!
//! Email parsing runs before any query, so the invalid cases need no
//! database. Upsert semantics are exercised by the ignored tests in
//! `storefront_repositories.rs`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use voltlane_integration_tests::TestClient;

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let mut client = TestClient::new();

    for bad in ["", "plainaddress", "@missing-local.com", "no-domain@", "a@b"] {
        let resp = client
            .post("/newsletter/subscribe", json!({ "email": bad }))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "email: {bad:?}");
        assert_eq!(resp.error(), "Please enter a valid email address");
    }
}

#[tokio::test]
async fn test_unsubscribe_rejects_invalid_email() {
    let mut client = TestClient::new();

    let resp = client
        .post("/newsletter/unsubscribe", json!({ "email": "nope" }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(!resp.success());
}
