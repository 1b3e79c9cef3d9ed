use crate::config::test_helpers::setup_test_app;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
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

#[tokio::test]
async fn test_driver_create_assigns_code_and_account() {
    let app = setup_test_app().await;

    let driver_data = json!({
        "name": "Joko Susilo",
        "phone": "+62855555555",
        "email": "joko@petagri.id",
        "vehicle_plate_number": "B 1234 XYZ",
        "vehicle_type": "truck"
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/drivers")
                .header("content-type", "application/json")
                .body(Body::from(driver_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = extract_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create driver: {body:?}");
    assert_eq!(body["status"], "active");
    assert_eq!(body["vehicle_type"], "truck");

    let code = body["driver_code"].as_str().unwrap();
    assert!(code.starts_with("DRV-"), "Unexpected driver code: {code}");
    assert_eq!(code.len(), 10);

    let driver_id = body["id"].as_str().unwrap().to_string();

    let profile_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/profiles/{driver_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (profile_status, profile_body) = extract_response_body(profile_response).await;
    assert_eq!(profile_status, StatusCode::OK);
    assert_eq!(profile_body["email"], "joko@petagri.id");
}

#[tokio::test]
async fn test_driver_create_requires_email() {
    let app = setup_test_app().await;

    let driver_data = json!({
        "name": "No Email",
        "phone": "+62800000000"
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/drivers")
                .header("content-type", "application/json")
                .body(Body::from(driver_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        !response.status().is_success(),
        "Driver without an account email should be rejected"
    );
}

#[tokio::test]
async fn test_driver_status_update() {
    let app = setup_test_app().await;

    let driver_data = json!({
        "name": "Rudi Hartono",
        "phone": "+62866666666",
        "email": "rudi@petagri.id"
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/drivers")
                .header("content-type", "application/json")
                .body(Body::from(driver_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, body) = extract_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED);
    let driver_id = body["id"].as_str().unwrap().to_string();
    let code = body["driver_code"].as_str().unwrap().to_string();

    let update_data = json!({ "status": "nonactive" });
    let update_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/drivers/{driver_id}"))
                .header("content-type", "application/json")
                .body(Body::from(update_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let (update_status, update_body) = extract_response_body(update_response).await;
    assert_eq!(update_status, StatusCode::OK);
    assert_eq!(update_body["status"], "nonactive");
    // The generated code survives updates
    assert_eq!(update_body["driver_code"], code.as_str());
}
