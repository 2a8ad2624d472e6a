mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{get, send_raw, test_app};

const JSON: Option<&str> = Some("application/json");

fn assert_json_error(status: StatusCode, body: &serde_json::Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_json_bad_request() {
    let app = test_app();
    for uri in ["/api/notes", "/api/activity", "/api/designs", "/api/ai/generate"] {
        let (status, body) = send_raw(&app, Method::POST, uri, JSON, "{not json").await;
        assert_json_error(status, &body);
    }
}

#[tokio::test]
async fn wrong_field_type_is_a_json_bad_request() {
    let app = test_app();
    let (status, body) = send_raw(&app, Method::POST, "/api/notes", JSON, r#"{"text":5}"#).await;
    assert_json_error(status, &body);

    let (status, body) =
        send_raw(&app, Method::POST, "/api/ai/image", JSON, r#"{"prompt":[1,2]}"#).await;
    assert_json_error(status, &body);

    // nothing was stored
    let (_, notes) = get(&app, "/api/notes").await;
    assert!(notes.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_content_type_is_a_json_bad_request() {
    let app = test_app();
    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/ai/generate",
        None,
        r#"{"prompt":"hello"}"#,
    )
    .await;
    assert_json_error(status, &body);

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/notes",
        Some("text/plain"),
        r#"{"text":"x"}"#,
    )
    .await;
    assert_json_error(status, &body);
}

#[tokio::test]
async fn unparseable_limit_is_a_json_bad_request() {
    let app = test_app();
    for uri in [
        "/api/notes?limit=abc",
        "/api/notes?limit=-1",
        "/api/activity?limit=abc",
        "/api/activity?limit=1.5",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_json_error(status, &body);
    }
}
