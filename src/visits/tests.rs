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

async fn post_json(app: &axum::Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    extract_response_body(response).await
}

async fn create_test_farm(app: &axum::Router) -> String {
    let (status, body) = post_json(
        app,
        "/api/farms",
        &json!({
            "name": "Kebun Kunjungan",
            "location": "Sukabumi",
            "commodity": "teh",
            "area_ha": 7.25
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create farm: {body:?}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_test_consultant(app: &axum::Router) -> String {
    let (status, body) = post_json(
        app,
        "/api/consultants",
        &json!({
            "full_name": "Dewi Lestari",
            "email": format!("dewi-{}@petagri.id", uuid::Uuid::new_v4()),
            "phone": "+62844444444"
        }),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create consultant: {body:?}"
    );
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_visit_crud_operations() {
    let app = setup_test_app().await;
    let farm_id = create_test_farm(&app).await;
    let consultant_id = create_test_consultant(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/visits",
        &json!({
            "farm_id": farm_id,
            "consultant_id": consultant_id,
            "scheduled_date": "2026-09-02T08:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create visit: {body:?}");
    // New visits are scheduled, never anything else
    assert_eq!(body["status"], "scheduled");
    let visit_id = body["id"].as_str().unwrap().to_string();

    let get_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/visits/{visit_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (get_status, get_body) = extract_response_body(get_response).await;
    assert_eq!(get_status, StatusCode::OK, "Failed to get visit: {get_body:?}");
    assert_eq!(get_body["farm_name"], "Kebun Kunjungan");
    assert_eq!(get_body["consultant_name"], "Dewi Lestari");
    assert!(get_body["report_id"].is_null());

    let cancel_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/visits/{visit_id}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({"status": "cancelled"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let (cancel_status, cancel_body) = extract_response_body(cancel_response).await;
    assert_eq!(cancel_status, StatusCode::OK, "Cancel failed: {cancel_body:?}");
    assert_eq!(cancel_body["status"], "cancelled");

    // Cancelled visits can be rescheduled; there is no transition matrix
    let reopen_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/visits/{visit_id}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({"status": "scheduled"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let (reopen_status, reopen_body) = extract_response_body(reopen_response).await;
    assert_eq!(reopen_status, StatusCode::OK);
    assert_eq!(reopen_body["status"], "scheduled");
}

#[tokio::test]
async fn test_visit_rejects_unknown_status() {
    let app = setup_test_app().await;
    let farm_id = create_test_farm(&app).await;
    let consultant_id = create_test_consultant(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/visits",
        &json!({
            "farm_id": farm_id,
            "consultant_id": consultant_id,
            "scheduled_date": "2026-09-03T08:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let visit_id = body["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/visits/{visit_id}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({"status": "postponed"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response.status().is_client_error(),
        "Status outside the enum should be rejected"
    );
}

#[tokio::test]
async fn test_visit_list_includes_names() {
    let app = setup_test_app().await;
    let farm_id = create_test_farm(&app).await;
    let consultant_id = create_test_consultant(&app).await;

    for day in ["2026-09-04T08:00:00Z", "2026-09-05T08:00:00Z"] {
        let (status, _) = post_json(
            &app,
            "/api/visits",
            &json!({
                "farm_id": farm_id,
                "consultant_id": consultant_id,
                "scheduled_date": day
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let list_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/visits")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (list_status, list_body) = extract_response_body(list_response).await;
    assert_eq!(list_status, StatusCode::OK);
    let visits = list_body.as_array().unwrap();
    assert_eq!(visits.len(), 2);
    for visit in visits {
        assert_eq!(visit["farm_name"], "Kebun Kunjungan");
        assert_eq!(visit["consultant_name"], "Dewi Lestari");
    }
}
