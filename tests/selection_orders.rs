//! Order Selection Endpoint Tests
//!
//! `POST /selection-orders` end to end against a recording store:
//! - Conditions become one parameterized clause, values never inlined
//! - Missing or empty condition lists keep their 500 response
//! - Whitelist failures are 400 and never reach the store

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use haulbase::store::{RecordingStore, Scripted, SqlValue};
use serde_json::json;

use common::{gateway, json_request, raw_request, send};

#[tokio::test]
async fn test_two_conditions_with_and() {
    let (router, store) = gateway(RecordingStore::new().respond_rows(vec![
        json!({"ordernumber": 1, "totalcost": 150, "customerid": 5}),
    ]));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "totalCost", "comparisonOperator": ">", "value": "100"},
                {"field": "customerID", "comparisonOperator": "=", "value": "5", "logicalOperator": "AND"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["totalcost"], 150);

    let calls = store.calls();
    assert_eq!(
        calls[0].sql,
        "SELECT * FROM \"Order\" WHERE 1=1 AND totalCost > $1 AND customerID = $2"
    );
    assert_eq!(calls[0].params, vec![SqlValue::text("100"), SqlValue::text("5")]);
}

#[tokio::test]
async fn test_date_condition_shifted() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "orderDate", "comparisonOperator": ">=", "value": "2024-01-15"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    assert_eq!(store.calls()[0].params, vec![SqlValue::Timestamp(expected)]);
}

#[tokio::test]
async fn test_like_condition_wrapped() {
    let (router, store) = gateway(RecordingStore::new());

    send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "orderNumber", "comparisonOperator": "LIKE", "value": "12"}
            ]}),
        ),
    )
    .await;

    assert_eq!(store.calls()[0].params, vec![SqlValue::text("%12%")]);
}

#[tokio::test]
async fn test_empty_conditions_is_server_error() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request("POST", "/selection-orders", json!({"conditions": []})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "No conditions provided"})
    );
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_missing_conditions_is_server_error() {
    let (router, _store) = gateway(RecordingStore::new());

    let (status, body) = send(router, json_request("POST", "/selection-orders", json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "No conditions provided");
}

#[tokio::test]
async fn test_unknown_field_rejected() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "orderNumber; DROP TABLE Customer", "comparisonOperator": "=", "value": "1"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_second_condition_invalid_rejects_whole_request() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "totalCost", "comparisonOperator": ">", "value": "100"},
                {"field": "totalCost", "comparisonOperator": "<>", "value": "5", "logicalOperator": "OR"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_injection_in_value_stays_bound() {
    let (router, store) = gateway(RecordingStore::new());

    send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "orderNumber", "comparisonOperator": "LIKE", "value": "1' OR '1'='1"}
            ]}),
        ),
    )
    .await;

    let calls = store.calls();
    assert!(!calls[0].sql.contains("OR '1'"));
    assert_eq!(calls[0].params, vec![SqlValue::text("%1' OR '1'='1%")]);
}

#[tokio::test]
async fn test_store_failure_surfaces_message() {
    let (router, _store) =
        gateway(RecordingStore::new().respond(Scripted::Fail("relation missing".into())));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "customerID", "comparisonOperator": "=", "value": 5}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("relation missing"));
}

#[tokio::test]
async fn test_body_without_json_is_bad_request() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(router, raw_request("POST", "/selection-orders", "not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (router, store) = gateway(RecordingStore::new());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/selection-orders")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"conditions\": ["))
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_like_on_order_date_rejected() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "orderDate", "comparisonOperator": "LIKE", "value": "2024-03"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_fractional_customer_id_rejected() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/selection-orders",
            json!({"conditions": [
                {"field": "customerID", "comparisonOperator": "=", "value": "2.5"}
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}
