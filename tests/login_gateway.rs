//! Login Endpoint Tests
//!
//! Role dispatch, response shapes and input validation for `POST /login`:
//! - Successful lookups return the normalized user record
//! - No match and store failures are both a plain 401
//! - Bad input is rejected before any query runs

mod common;

use axum::http::StatusCode;
use haulbase::store::{RecordingStore, Scripted, SqlValue};
use serde_json::json;

use common::{gateway, json_request, send};

#[tokio::test]
async fn test_customer_login_returns_profile() {
    let (router, store) = gateway(RecordingStore::new().respond_rows(vec![json!({
        "userid": 12,
        "name": "Ada",
        "contactnumber": 6045550100u64,
        "homeaddress": "1 Main St"
    })]));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "pw", "userType": "customer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "user": {
                "id": 12,
                "name": "Ada",
                "contactNumber": 6045550100u64,
                "homeAddress": "1 Main St"
            }
        })
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].sql.contains("FROM Customer"));
    assert!(!calls[0].sql.contains("SELECT userID, name, password"));
    assert_eq!(calls[0].params, vec![SqlValue::text("12"), SqlValue::text("pw")]);
}

#[tokio::test]
async fn test_carrier_login_uses_carrier_table() {
    let (router, store) = gateway(RecordingStore::new().respond_rows(vec![json!({
        "userid": 7,
        "name": "Swift",
        "servicearea": "North",
        "overallrating": 4.5
    })]));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": "7", "password": "pw", "userType": "carrier"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["serviceArea"], "North");
    assert_eq!(body["user"]["overallRating"], 4.5);
    assert!(store.calls()[0].sql.contains("FROM Carrier"));
}

#[tokio::test]
async fn test_no_match_is_unauthorized() {
    let (router, _store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "wrong", "userType": "supplier"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid credentials"})
    );
}

#[tokio::test]
async fn test_store_failure_looks_like_bad_credentials() {
    let (router, _store) =
        gateway(RecordingStore::new().respond(Scripted::Fail("connection reset".into())));

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "pw", "userType": "customer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_missing_input_rejected_without_query() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request("POST", "/login", json!({"userId": 12, "userType": "customer"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid input: userId, password, and userType are required."
    );
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_role_rejected_without_query() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "pw", "userType": "admin"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_role_tag_is_case_sensitive() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "pw", "userType": "Customer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_non_numeric_identifier_rejected() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, _body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": "12 OR 1=1", "password": "pw", "userType": "customer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_mistyped_role_tag_is_json_bad_request() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": 12, "password": "pw", "userType": 5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_fractional_identifier_rejected() {
    let (router, store) = gateway(RecordingStore::new());

    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/login",
            json!({"userId": "12.5", "password": "pw", "userType": "customer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(store.calls().is_empty());
}
