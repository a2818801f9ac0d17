//! Integration tests for the customer CRUD surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p customer-registry-api)
//! - Network access to ViaCEP for address resolution
//!
//! Run with: cargo test -p customer-registry-integration-tests -- --ignored

use customer_registry_integration_tests::{base_url, client};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

/// A postal code ViaCEP always resolves (Praça da Sé, São Paulo).
const KNOWN_CEP: &str = "01001-000";

/// Test helper: create a customer and return the response body.
async fn create_customer(name: &str, postal_code: &str) -> Value {
    let resp = client()
        .post(format!("{}/customers", base_url()))
        .json(&json!({"name": name, "address": {"postalCode": postal_code}}))
        .send()
        .await
        .expect("Failed to create customer");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse response")
}

/// Test helper: a name unique to this test run.
fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

// ============================================================================
// Read & Write Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_create_resolves_and_embeds_address() {
    let name = unique_name("Ana");
    let body = create_customer(&name, KNOWN_CEP).await;

    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["address"]["postalCode"], KNOWN_CEP);
    assert_eq!(body["address"]["city"], "São Paulo");
    assert_eq!(body["address"]["stateCode"], "SP");
}

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_second_create_reuses_cached_address() {
    let first = create_customer(&unique_name("Ana"), KNOWN_CEP).await;
    let second = create_customer(&unique_name("Rui"), "01001000").await;

    // Different customers, identical address content; the unhyphenated
    // spelling must land on the same cached row.
    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["address"], second["address"]);
}

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_get_by_id_matches_created() {
    let created = create_customer(&unique_name("Ana"), KNOWN_CEP).await;
    let id = created["id"].as_i64().expect("id missing");

    let resp = client()
        .get(format!("{}/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get customer");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body, created);
}

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_get_all_contains_created() {
    let created = create_customer(&unique_name("Ana"), KNOWN_CEP).await;

    let resp = client()
        .get(format!("{}/customers", base_url()))
        .send()
        .await
        .expect("Failed to list customers");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let list = body.as_array().expect("expected a bare list");
    assert!(list.iter().any(|c| c["id"] == created["id"]));
}

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_update_replaces_record_and_keeps_id() {
    let created = create_customer(&unique_name("Ana"), KNOWN_CEP).await;
    let id = created["id"].as_i64().expect("id missing");
    let new_name = unique_name("Beatriz");

    let resp = client()
        .put(format!("{}/customers/{id}", base_url()))
        .json(&json!({
            // Payload id is ignored; the path id wins
            "id": 424_242,
            "name": new_name,
            "address": {"postalCode": "70040-010"}
        }))
        .send()
        .await
        .expect("Failed to update customer");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["name"], new_name.as_str());
    assert_eq!(body["address"]["postalCode"], "70040-010");
}

#[tokio::test]
#[ignore = "Requires running API server, database, and ViaCEP access"]
async fn test_delete_then_get_is_not_found() {
    let created = create_customer(&unique_name("Ana"), KNOWN_CEP).await;
    let id = created["id"].as_i64().expect("id missing");

    let resp = client()
        .delete(format!("{}/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client()
        .get(format!("{}/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get customer");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Error Envelope Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_unknown_id_yields_not_found_envelope() {
    let resp = client()
        .delete(format!("{}/customers/999999999", base_url()))
        .send()
        .await
        .expect("Failed to send delete");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Resource not found");
    assert_eq!(body["status"], 404);
    assert!(
        body["type"]
            .as_str()
            .expect("type missing")
            .ends_with("/resource-not-found")
    );
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_unknown_id_yields_not_found() {
    let resp = client()
        .put(format!("{}/customers/999999999", base_url()))
        .json(&json!({"name": "Ana", "address": {"postalCode": KNOWN_CEP}}))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_invalid_payload_lists_each_field() {
    let resp = client()
        .post(format!("{}/customers", base_url()))
        .json(&json!({"name": "   "}))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Invalid data");

    let descriptions = body["descriptions"].as_array().expect("descriptions missing");
    let fields: Vec<&str> = descriptions
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(fields, vec!["name", "address"]);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_malformed_body_is_incomprehensible() {
    let resp = client()
        .post(format!("{}/customers", base_url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Incomprehensible message");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_property_is_incomprehensible() {
    let resp = client()
        .post(format!("{}/customers", base_url()))
        .json(&json!({
            "name": "Ana",
            "nickname": "A",
            "address": {"postalCode": KNOWN_CEP}
        }))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Incomprehensible message");
    assert!(
        body["detail"]
            .as_str()
            .expect("detail missing")
            .contains("nickname")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_non_numeric_id_is_invalid_param() {
    let resp = client()
        .get(format!("{}/customers/abc", base_url()))
        .send()
        .await
        .expect("Failed to send get");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Invalid parameter");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unmatched_route_yields_not_found_envelope() {
    let resp = client()
        .get(format!("{}/no-such-resource", base_url()))
        .send()
        .await
        .expect("Failed to send get");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Resource not found");
    assert!(
        body["detail"]
            .as_str()
            .expect("detail missing")
            .contains("/no-such-resource")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_postal_code_is_business_rule_violation() {
    let resp = client()
        .post(format!("{}/customers", base_url()))
        .json(&json!({"name": "Ana", "address": {"postalCode": "99999-999"}}))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse envelope");
    assert_eq!(body["title"], "Business rules violation");
}
