use crate::config::test_helpers::setup_test_app;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({"error": "Invalid JSON response"}));
    (status, body)
}

#[rstest]
#[case("konsultan")]
#[case("driver")]
#[case("mitra")]
#[tokio::test]
async fn test_role_create_and_fetch(#[case] role_name: &str) {
    let app = setup_test_app().await;

    let role_data = json!({
        "name": role_name,
        "description": format!("Platform role: {role_name}")
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/roles")
                .header("content-type", "application/json")
                .body(Body::from(role_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = extract_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create role: {body:?}");
    assert_eq!(body["name"], role_name);
    let role_id = body["id"].as_str().unwrap().to_string();

    let get_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/roles/{role_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (get_status, get_body) = extract_response_body(get_response).await;
    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(get_body["name"], role_name);
}

#[tokio::test]
async fn test_role_name_is_unique() {
    let app = setup_test_app().await;

    let role_data = json!({ "name": "konsultan" });

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/roles")
                .header("content-type", "application/json")
                .body(Body::from(role_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/roles")
                .header("content-type", "application/json")
                .body(Body::from(role_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        !second.status().is_success(),
        "Duplicate role name should be rejected"
    );
}
