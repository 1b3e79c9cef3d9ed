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

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    extract_response_body(response).await
}

/// Farm + consultant + scheduled visit, returning the visit id.
async fn create_test_visit(app: &axum::Router) -> String {
    let (status, farm) = post_json(
        app,
        "/api/farms",
        &json!({
            "name": "Kebun Laporan",
            "location": "Garut",
            "commodity": "kentang",
            "area_ha": 2.4
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create farm: {farm:?}");

    let (status, consultant) = post_json(
        app,
        "/api/consultants",
        &json!({
            "full_name": "Andi Saputra",
            "email": format!("andi-{}@petagri.id", uuid::Uuid::new_v4()),
            "phone": "+62855000000"
        }),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create consultant: {consultant:?}"
    );

    let (status, visit) = post_json(
        app,
        "/api/visits",
        &json!({
            "farm_id": farm["id"],
            "consultant_id": consultant["id"],
            "scheduled_date": "2026-09-10T07:30:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create visit: {visit:?}");
    visit["id"].as_str().unwrap().to_string()
}

fn report_payload(recommendations: Value) -> Value {
    json!({
        "plant_type": "kentang granola",
        "plant_age": "3 bulan",
        "land_area": 2.4,
        "problems": "Bercak daun meluas di blok timur",
        "gps_latitude": -7.214_500,
        "gps_longitude": 107.908_100,
        "weather_notes": "Hujan ringan saat kunjungan",
        "recommendations": recommendations
    })
}

#[tokio::test]
async fn test_report_submission_completes_visit() {
    let app = setup_test_app().await;
    let visit_id = create_test_visit(&app).await;

    let payload = report_payload(json!([
        {
            "product_name": "Fungisida Mankozeb",
            "function": "pengendalian bercak daun",
            "dosage": "2 g/L",
            "estimated_qty": 3,
            "urgency": "segera"
        },
        {
            "product_name": "Pupuk KCl",
            "estimated_qty": 2,
            "urgency": "terjadwal"
        }
    ]));

    let (status, report) = post_json(&app, &format!("/api/visits/{visit_id}/report"), &payload).await;
    assert_eq!(status, StatusCode::OK, "Failed to save report: {report:?}");
    assert_eq!(report["visit_id"], visit_id.as_str());
    assert_eq!(report["recommendations"].as_array().unwrap().len(), 2);

    // Saving the report completes the visit
    let (visit_status, visit) = get_json(&app, &format!("/api/visits/{visit_id}")).await;
    assert_eq!(visit_status, StatusCode::OK);
    assert_eq!(visit["status"], "completed");
    assert_eq!(visit["report_id"], report["id"]);

    let (get_status, fetched) = get_json(&app, &format!("/api/visits/{visit_id}/report")).await;
    assert_eq!(get_status, StatusCode::OK, "Failed to fetch report: {fetched:?}");
    assert_eq!(fetched["id"], report["id"]);
    assert_eq!(fetched["plant_type"], "kentang granola");
}

#[tokio::test]
async fn test_report_resubmission_updates_in_place() {
    let app = setup_test_app().await;
    let visit_id = create_test_visit(&app).await;

    let first_payload = report_payload(json!([
        {
            "product_name": "Fungisida Mankozeb",
            "estimated_qty": 3,
            "urgency": "segera"
        },
        {
            "product_name": "Pupuk KCl",
            "estimated_qty": 2,
            "urgency": "terjadwal"
        }
    ]));
    let (status, first) =
        post_json(&app, &format!("/api/visits/{visit_id}/report"), &first_payload).await;
    assert_eq!(status, StatusCode::OK);

    // Same visit, new findings: one recommendation instead of two
    let mut second_payload = report_payload(json!([
        {
            "product_name": "Insektisida Abamektin",
            "estimated_qty": 1,
            "urgency": "segera"
        }
    ]));
    second_payload["problems"] = json!("Serangan thrips, bercak daun teratasi");
    let (status, second) =
        post_json(&app, &format!("/api/visits/{visit_id}/report"), &second_payload).await;
    assert_eq!(status, StatusCode::OK);

    // Upsert: same row both times
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["problems"], "Serangan thrips, bercak daun teratasi");

    // Exactly one report row for the visit
    let (_, all_reports) = get_json(&app, "/api/visit_reports").await;
    assert_eq!(all_reports.as_array().unwrap().len(), 1);

    // The recommendation set is replaced, not appended to
    let recs = second["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["product_name"], "Insektisida Abamektin");

    let (_, all_recs) = get_json(&app, "/api/visit_recommendations").await;
    assert_eq!(all_recs.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_report_for_missing_visit_is_404() {
    let app = setup_test_app().await;

    let payload = report_payload(json!([]));
    let (status, _) = post_json(
        &app,
        &format!("/api/visits/{}/report", uuid::Uuid::new_v4()),
        &payload,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visit_without_report_is_404() {
    let app = setup_test_app().await;
    let visit_id = create_test_visit(&app).await;

    let (status, _) = get_json(&app, &format!("/api/visits/{visit_id}/report")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
