use super::models::{Partner, router as crudrouter};
use crate::common::auth::Role;
use crate::common::errors::ApiError;
use crate::common::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::{Value, json};
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

    mutating_router = mutating_router.route(
        "/{id}/products",
        get(get_partner_products).with_state(state.clone()),
    );

    if let Some(instance) = state.keycloak_auth_instance.clone() {
        mutating_router = mutating_router.layer(
            KeycloakAuthLayer::<Role>::builder()
                .instance(instance)
                .passthrough_mode(PassthroughMode::Block)
                .persist_raw_claims(false)
                .expected_audiences(vec![String::from("account")])
                .required_roles(vec![Role::Administrator])
                .build(),
        );
    } else if !state.config.tests_running {
        tracing::warn!(
            "Mutating routes of {} router are not protected",
            Partner::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}

/// Catalogue of one partner store, ordered by product name.
#[utoipa::path(
    get,
    path = "/partners/{id}/products",
    params(
        ("id" = Uuid, Path, description = "Partner ID to fetch products for")
    ),
    responses(
        (status = 200, description = "Products owned by this partner"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn get_partner_products(
    Path(partner_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let db = &app_state.db;

    super::models::Entity::find_by_id(partner_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("partner", partner_id))?;

    let products = crate::products::models::Entity::find()
        .filter(crate::products::models::Column::MitraId.eq(partner_id))
        .order_by_asc(crate::products::models::Column::Name)
        .all(db)
        .await
        .map_err(ApiError::from)?;

    let data: Vec<Value> = products
        .into_iter()
        .map(|p| {
            json!({
                "id": p.id,
                "mitra_id": p.mitra_id,
                "name": p.name,
                "brand": p.brand,
                "category": p.category,
                "description": p.description,
                "dosage": p.dosage,
                "unit": p.unit,
                "base_price": p.base_price,
                "note": p.note,
            })
        })
        .collect();

    Ok(Json(json!(data)))
}
