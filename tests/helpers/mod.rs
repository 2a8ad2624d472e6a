#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use matty_server::{app, config::Limits, repository::MemoryStore, service::MattyService};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory store with the default limits.
pub fn test_app() -> Router {
    let service = MattyService::new(Arc::new(MemoryStore::new()), Limits::default());
    app::router(Arc::new(service))
}

/// Sends one request and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    read_json(app, builder.body(body).unwrap()).await
}

/// Sends a raw body with an optional content type, for requests that are
/// not valid JSON documents.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    read_json(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn read_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Creates a note and returns its id.
pub async fn create_note(app: &Router, text: &str) -> i64 {
    let (status, note) = post(app, "/api/notes", serde_json::json!({ "text": text })).await;
    assert_eq!(status, StatusCode::CREATED);
    note["id"].as_i64().unwrap()
}
