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

async fn put_json(app: &axum::Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
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

/// Visit with a submitted report carrying two recommendations. Returns
/// (visit_id, report_id, consultant_id).
async fn setup_reported_visit(app: &axum::Router) -> (String, String, String) {
    let (_, farm) = post_json(
        app,
        "/api/farms",
        &json!({
            "name": "Kebun Tender",
            "location": "Lampung",
            "commodity": "jagung",
            "area_ha": 5.0
        }),
    )
    .await;

    let (_, consultant) = post_json(
        app,
        "/api/consultants",
        &json!({
            "full_name": "Hendra Gunawan",
            "email": format!("hendra-{}@petagri.id", uuid::Uuid::new_v4()),
            "phone": "+62856000000"
        }),
    )
    .await;

    let (status, visit) = post_json(
        app,
        "/api/visits",
        &json!({
            "farm_id": farm["id"],
            "consultant_id": consultant["id"],
            "scheduled_date": "2026-09-15T08:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create visit: {visit:?}");
    let visit_id = visit["id"].as_str().unwrap().to_string();

    let (status, report) = post_json(
        app,
        &format!("/api/visits/{visit_id}/report"),
        &json!({
            "plant_type": "jagung hibrida",
            "land_area": 5.0,
            "problems": "Ulat grayak di sebagian besar petak",
            "recommendations": [
                {
                    "product_name": "Insektisida Emamektin",
                    "function": "pengendalian ulat grayak",
                    "dosage": "0.5 L/ha",
                    "estimated_qty": 4,
                    "urgency": "segera"
                },
                {
                    "product_name": "Pupuk Urea",
                    "estimated_qty": 10,
                    "urgency": "terjadwal"
                }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to save report: {report:?}");

    (
        visit_id,
        report["id"].as_str().unwrap().to_string(),
        consultant["id"].as_str().unwrap().to_string(),
    )
}

async fn create_test_partner(app: &axum::Router, name: &str) -> String {
    let (status, partner) = post_json(
        app,
        "/api/partners",
        &json!({
            "name": name,
            "owner_name": "Pemilik",
            "address": "Jl. Tender 1",
            "city": "Metro",
            "province": "Lampung",
            "handphone": "+62813000000",
            "email": format!("mitra-{}@petagri.id", uuid::Uuid::new_v4())
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create partner: {partner:?}");
    partner["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_tender_draft_copies_recommendations() {
    let app = setup_test_app().await;
    let (_, report_id, _) = setup_reported_visit(&app).await;

    let (status, draft) = get_json(&app, &format!("/api/visit_reports/{report_id}/tender_draft")).await;
    assert_eq!(status, StatusCode::OK, "Failed to get draft: {draft:?}");
    let lines = draft.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    for line in lines {
        // Draft lines start at quantity 1 with no price
        assert_eq!(line["qty"], 1);
        assert!(line["price"].is_null());
    }
    assert_eq!(lines[0]["note"], "pengendalian ulat grayak");
}

#[tokio::test]
async fn test_assignment_originates_from_report() {
    let app = setup_test_app().await;
    let (visit_id, report_id, consultant_id) = setup_reported_visit(&app).await;

    let (status, assignment) = post_json(
        &app,
        &format!("/api/visit_reports/{report_id}/tender_assignments"),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z",
            "message": "Mohon penawaran sebelum tenggat"
        }),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to originate assignment: {assignment:?}"
    );
    assert_eq!(assignment["visit_id"], visit_id.as_str());
    assert_eq!(assignment["status"], "open");

    // One product line per recommendation at origination time
    let products = assignment["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    let names: Vec<&str> = products
        .iter()
        .map(|p| p["product_name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Insektisida Emamektin"));
    assert!(names.contains(&"Pupuk Urea"));
}

#[tokio::test]
async fn test_origination_from_missing_report_is_404() {
    let app = setup_test_app().await;
    let (_, _, consultant_id) = setup_reported_visit(&app).await;

    let (status, _) = post_json(
        &app,
        &format!("/api/visit_reports/{}/tender_assignments", uuid::Uuid::new_v4()),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_closed_assignment_rejects_offerings() {
    let app = setup_test_app().await;
    let (_, report_id, consultant_id) = setup_reported_visit(&app).await;
    let partner_id = create_test_partner(&app, "Toko Tutup").await;

    let (_, assignment) = post_json(
        &app,
        &format!("/api/visit_reports/{report_id}/tender_assignments"),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z"
        }),
    )
    .await;
    let assignment_id = assignment["id"].as_str().unwrap().to_string();

    let (status, updated) = put_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}"),
        &json!({ "status": "closed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to close assignment: {updated:?}");
    assert_eq!(updated["status"], "closed");

    let offering_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tender_offerings")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "tender_assign_id": assignment_id,
                        "offered_by": partner_id,
                        "products": [
                            { "product_name": "Insektisida Emamektin", "qty": 4, "price": 210_000.0 }
                        ]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        !offering_response.status().is_success(),
        "Closed assignments must not accept new offerings"
    );
}

#[tokio::test]
async fn test_winner_selection_is_idempotent() {
    let app = setup_test_app().await;
    let (_, report_id, consultant_id) = setup_reported_visit(&app).await;
    let partner_id = create_test_partner(&app, "Toko Pemenang").await;

    let (_, assignment) = post_json(
        &app,
        &format!("/api/visit_reports/{report_id}/tender_assignments"),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z"
        }),
    )
    .await;
    let assignment_id = assignment["id"].as_str().unwrap().to_string();

    let (status, offering) = post_json(
        &app,
        "/api/tender_offerings",
        &json!({
            "tender_assign_id": assignment_id,
            "offered_by": partner_id,
            "products": [
                { "product_name": "Insektisida Emamektin", "qty": 4, "price": 195_000.0 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create offering: {offering:?}");
    let offering_id = offering["id"].as_str().unwrap().to_string();

    // No winner yet
    let (status, _) = get_json(&app, &format!("/api/tender_assignments/{assignment_id}/winner")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (first_status, first) = put_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/winner"),
        &json!({ "winning_tender_offering_id": offering_id }),
    )
    .await;
    assert_eq!(first_status, StatusCode::OK, "Winner selection failed: {first:?}");

    let (second_status, second) = put_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/winner"),
        &json!({ "winning_tender_offering_id": offering_id }),
    )
    .await;
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["id"], first["id"], "Re-selecting must reuse the approval row");

    let (_, approvals) = get_json(&app, "/api/tender_approves").await;
    assert_eq!(approvals.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_winner_must_belong_to_assignment() {
    let app = setup_test_app().await;
    let (visit_id, report_id, consultant_id) = setup_reported_visit(&app).await;
    let partner_id = create_test_partner(&app, "Toko Lain").await;

    let (_, first_assignment) = post_json(
        &app,
        &format!("/api/visit_reports/{report_id}/tender_assignments"),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z"
        }),
    )
    .await;
    let first_id = first_assignment["id"].as_str().unwrap().to_string();

    // A second assignment on the same visit
    let (status, second_assignment) = post_json(
        &app,
        "/api/tender_assignments",
        &json!({
            "visit_id": visit_id,
            "assigned_by": consultant_id,
            "deadline": "2026-09-30T17:00:00Z",
            "products": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = second_assignment["id"].as_str().unwrap().to_string();

    let (_, offering) = post_json(
        &app,
        "/api/tender_offerings",
        &json!({
            "tender_assign_id": first_id,
            "offered_by": partner_id,
            "products": [
                { "product_name": "Pupuk Urea", "qty": 10, "price": 340_000.0 }
            ]
        }),
    )
    .await;
    let offering_id = offering["id"].as_str().unwrap().to_string();

    let (status, _) = put_json(
        &app,
        &format!("/api/tender_assignments/{second_id}/winner"),
        &json!({ "winning_tender_offering_id": offering_id }),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Offering from another assignment must be rejected"
    );
}

#[tokio::test]
async fn test_full_tender_flow_to_delivery_order() {
    let app = setup_test_app().await;
    let (visit_id, report_id, consultant_id) = setup_reported_visit(&app).await;
    let partner_id = create_test_partner(&app, "Toko Sumber Rejeki").await;

    let (_, assignment) = post_json(
        &app,
        &format!("/api/visit_reports/{report_id}/tender_assignments"),
        &json!({
            "assigned_by": consultant_id,
            "deadline": "2026-09-22T17:00:00Z",
            "message": "Pengiriman ke kebun langsung"
        }),
    )
    .await;
    let assignment_id = assignment["id"].as_str().unwrap().to_string();

    // Delivery order only exists once a winner is approved
    let (status, _) = get_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/delivery_order"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, offering) = post_json(
        &app,
        "/api/tender_offerings",
        &json!({
            "tender_assign_id": assignment_id,
            "offered_by": partner_id,
            "products": [
                { "product_name": "Insektisida Emamektin", "qty": 4, "price": 195_000.0 },
                { "product_name": "Pupuk Urea", "qty": 10, "price": 340_000.0 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create offering: {offering:?}");
    let offering_id = offering["id"].as_str().unwrap().to_string();
    assert_eq!(offering["products"].as_array().unwrap().len(), 2);

    let (status, listed) = get_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/offerings"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["partner"]["name"], "Toko Sumber Rejeki");
    assert_eq!(listed[0]["products"].as_array().unwrap().len(), 2);

    let (status, approval) = put_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/winner"),
        &json!({ "winning_tender_offering_id": offering_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Winner selection failed: {approval:?}");

    let (status, order) = get_json(
        &app,
        &format!("/api/tender_assignments/{assignment_id}/delivery_order"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to get delivery order: {order:?}");

    assert_eq!(order["assignment"]["id"], assignment_id.as_str());
    assert_eq!(order["visit"]["id"], visit_id.as_str());
    assert_eq!(order["visit"]["farm"]["name"], "Kebun Tender");
    assert_eq!(order["partner"]["name"], "Toko Sumber Rejeki");
    assert_eq!(order["winning_offering"]["id"], offering_id.as_str());
    assert_eq!(
        order["winning_offering"]["products"].as_array().unwrap().len(),
        2
    );

    // 4 x 195000 + 10 x 340000
    let total = &order["winning_offering"]["total_value"];
    let total = total
        .as_f64()
        .or_else(|| total.as_str().and_then(|s| s.parse::<f64>().ok()))
        .expect("total_value should be numeric");
    assert!((total - 4_180_000.0).abs() < f64::EPSILON * 1e10);
}
