//! Shared helpers for driving the gateway router in-process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use haulbase::http_server::{GatewayState, HttpServer, HttpServerConfig, ScriptSettings};
use haulbase::store::RecordingStore;
use serde_json::Value;
use tower::ServiceExt;

pub fn script_settings(path: PathBuf) -> ScriptSettings {
    ScriptSettings {
        path,
        init_timeout: Duration::from_secs(10),
        commit_timeout: Duration::from_secs(5),
    }
}

/// Router over a recording store, plus a handle to inspect its calls
pub fn gateway(store: RecordingStore) -> (Router, Arc<RecordingStore>) {
    gateway_with_script(store, PathBuf::from("./initialization.sql"))
}

pub fn gateway_with_script(
    store: RecordingStore,
    script: PathBuf,
) -> (Router, Arc<RecordingStore>) {
    let store = Arc::new(store);
    let state = Arc::new(GatewayState::new(store.clone(), script_settings(script)));
    let router = HttpServer::build_router(&HttpServerConfig::default(), state);
    (router, store)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Request whose body is sent as-is, with no content type
pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send_raw(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
