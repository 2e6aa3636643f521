//! Integration tests for `/api/search` and the health endpoints.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`sf-cli migrate`)
//! - The server running against it (cargo run -p snackfinder-server)
//!
//! Run with: cargo test -p snackfinder-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use snackfinder_integration_tests::{TestContext, base_url, unique_item_name};

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_health_endpoints() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_api_returns_raw_matches_newest_first() {
    let ctx = TestContext::new().await;
    let name = unique_item_name("Flamin Hot");

    ctx.record_sale(&name, 125, 1_000, Some("snaxa")).await.unwrap();
    ctx.record_sale(&name, 150, 3_000, Some("mug")).await.unwrap();
    ctx.record_sale(&name, 0, 2_000, None).await.unwrap();

    // Case-insensitive substring of the name
    let query = name.to_uppercase();
    let resp = ctx
        .client
        .get(ctx.url("/api/search", &[("query", query.get(6..).unwrap())]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(body.len(), 3);

    let times: Vec<i64> = body
        .iter()
        .map(|r| r["createdtime"].as_i64().unwrap())
        .collect();
    assert_eq!(times, vec![3_000, 2_000, 1_000]);

    assert_eq!(body[0]["price"], json!(150));
    assert_eq!(body[0]["orders"], json!({ "storefront": "mug" }));
    assert_eq!(body[1]["orders"], json!({ "storefront": null }));
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_api_keeps_query_whitespace() {
    let ctx = TestContext::new().await;
    let tag = unique_item_name("Padded");

    ctx.record_sale(&format!("{tag} Bar"), 100, 2_000, Some("ug"))
        .await
        .unwrap();
    ctx.record_sale(&format!("{tag}Barbecue"), 100, 1_000, Some("ug"))
        .await
        .unwrap();

    // The trailing space is part of the substring, so only the first name matches
    let padded = format!("{tag} ");
    let resp = ctx
        .client
        .get(ctx.url("/api/search", &[("query", padded.as_str())]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Vec<Value> = resp.json().await.unwrap();
    let names: Vec<&str> = body.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec![format!("{tag} Bar")]);

    // Without the padding both match, and the earlier result was not reused
    let resp = ctx
        .client
        .get(ctx.url("/api/search", &[("query", tag.as_str())]))
        .send()
        .await
        .unwrap();
    let body: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(body.len(), 2);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn test_api_not_found() {
    let ctx = TestContext::new().await;
    let name = unique_item_name("never sold");

    let resp = ctx
        .client
        .get(ctx.url("/api/search", &[("query", name.as_str())]))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Item not found" }));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_api_rejects_post() {
    let resp = Client::new()
        .post(format!("{}/api/search?query=chips", base_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Method Not Allowed" }));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_api_treats_like_wildcards_literally() {
    let resp = Client::new()
        .get(format!("{}/api/search?query=%25_%25_%25_%25_%25", base_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
