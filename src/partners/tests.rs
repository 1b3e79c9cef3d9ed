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

async fn create_test_partner(app: &axum::Router) -> String {
    let partner_data = json!({
        "name": format!("Toko Tani Makmur {}", uuid::Uuid::new_v4()),
        "owner_name": "Pak Dedi",
        "address": "Jl. Raya Bogor KM 30",
        "city": "Depok",
        "province": "Jawa Barat",
        "handphone": "+62877777777",
        "email": format!("toko-{}@petagri.id", uuid::Uuid::new_v4())
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/partners")
                .header("content-type", "application/json")
                .body(Body::from(partner_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = extract_response_body(response).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create test partner: {body:?}"
    );
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_partner_create_provisions_account() {
    let app = setup_test_app().await;

    let partner_data = json!({
        "name": "Toko Subur Jaya",
        "owner_name": "Bu Rina",
        "address": "Jl. Pasar Minggu 5",
        "city": "Jakarta Selatan",
        "province": "DKI Jakarta",
        "handphone": "+62888888888",
        "email": "rina@tokosubur.id"
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/partners")
                .header("content-type", "application/json")
                .body(Body::from(partner_data.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = extract_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create partner: {body:?}");
    assert_eq!(body["status"], "active");
    let partner_id = body["id"].as_str().unwrap().to_string();

    // Account provisioned under the owner's name
    let profile_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/profiles/{partner_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (profile_status, profile_body) = extract_response_body(profile_response).await;
    assert_eq!(profile_status, StatusCode::OK);
    assert_eq!(profile_body["email"], "rina@tokosubur.id");
    assert_eq!(profile_body["full_name"], "Bu Rina");
}

#[tokio::test]
async fn test_partner_product_catalogue() {
    let app = setup_test_app().await;
    let partner_id = create_test_partner(&app).await;

    for (name, price) in [("Pupuk NPK 16-16-16", 185_000.0), ("Fungisida Altan", 92_500.0)] {
        let product_data = json!({
            "mitra_id": partner_id,
            "name": name,
            "category": "agro-input",
            "unit": "karung",
            "base_price": price
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from(product_data.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, body) = extract_response_body(response).await;
        assert_eq!(status, StatusCode::CREATED, "Failed to create product: {body:?}");
    }

    let catalogue_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/partners/{partner_id}/products"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = extract_response_body(catalogue_response).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Ordered by name
    assert_eq!(items[0]["name"], "Fungisida Altan");
    assert_eq!(items[1]["name"], "Pupuk NPK 16-16-16");
}

#[tokio::test]
async fn test_partner_catalogue_unknown_partner_is_404() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/partners/{}/products", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
