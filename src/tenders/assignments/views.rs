use super::models::{TenderAssignment, router as crudrouter};
use super::services::{AssignmentOrigination, DraftLine};
use crate::common::auth::Role;
use crate::common::errors::ApiError;
use crate::common::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde_json::{Value, json};
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

    mutating_router = mutating_router
        .route(
            "/{id}/offerings",
            get(get_assignment_offerings).with_state(state.clone()),
        )
        .route(
            "/{id}/winner",
            get(crate::tenders::approvals::views::get_winner).with_state(state.clone()),
        )
        .route(
            "/{id}/winner",
            put(crate::tenders::approvals::views::select_winner).with_state(state.clone()),
        )
        .route(
            "/{id}/delivery_order",
            get(crate::tenders::delivery::get_delivery_order).with_state(state.clone()),
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
            TenderAssignment::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}

/// All offerings submitted for an assignment, each annotated with the
/// submitting partner's profile and its product lines.
#[utoipa::path(
    get,
    path = "/tender_assignments/{id}/offerings",
    params(
        ("id" = Uuid, Path, description = "Tender assignment ID")
    ),
    responses(
        (status = 200, description = "Offerings for this assignment"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "tender_assignments"
)]
pub async fn get_assignment_offerings(
    Path(assignment_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let db = &app_state.db;

    super::models::Entity::find_by_id(assignment_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("tender assignment", assignment_id))?;

    let offerings = crate::tenders::offerings::models::Entity::find()
        .filter(crate::tenders::offerings::models::Column::TenderAssignId.eq(assignment_id))
        .order_by_asc(crate::tenders::offerings::models::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ApiError::from)?;

    let mut data = Vec::new();
    for offering in offerings {
        let products = offering
            .find_related(crate::tenders::offerings::products::models::Entity)
            .all(db)
            .await
            .map_err(ApiError::from)?;

        let partner = crate::partners::models::Entity::find_by_id(offering.offered_by)
            .one(db)
            .await
            .map_err(ApiError::from)?;

        let products_data: Vec<Value> = products
            .into_iter()
            .map(|p| {
                json!({
                    "id": p.id,
                    "product_name": p.product_name,
                    "dosage": p.dosage,
                    "qty": p.qty,
                    "price": p.price,
                    "note": p.note,
                })
            })
            .collect();

        data.push(json!({
            "id": offering.id,
            "tender_assign_id": offering.tender_assign_id,
            "offered_by": offering.offered_by,
            "created_at": offering.created_at,
            "partner": partner.map(|m| {
                json!({
                    "id": m.id,
                    "name": m.name,
                    "owner_name": m.owner_name,
                    "city": m.city,
                    "handphone": m.handphone,
                })
            }),
            "products": products_data,
        }));
    }

    Ok(Json(json!(data)))
}

/// Pre-populated tender lines for a report, one per recommendation.
#[utoipa::path(
    get,
    path = "/visit_reports/{id}/tender_draft",
    params(
        ("id" = Uuid, Path, description = "Visit report ID")
    ),
    responses(
        (status = 200, description = "Draft assignment lines", body = Vec<DraftLine>),
        (status = 404, description = "Report not found")
    ),
    tag = "visit_reports"
)]
pub async fn get_tender_draft(
    Path(report_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<DraftLine>>, ApiError> {
    let lines = super::services::draft_from_report(&app_state.db, report_id)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(lines))
}

/// Originate a tender assignment from a visit report.
#[utoipa::path(
    post,
    path = "/visit_reports/{id}/tender_assignments",
    params(
        ("id" = Uuid, Path, description = "Visit report ID")
    ),
    request_body = AssignmentOrigination,
    responses(
        (status = 201, description = "Assignment created", body = TenderAssignment),
        (status = 404, description = "Report not found")
    ),
    tag = "visit_reports"
)]
pub async fn create_assignment_from_report(
    Path(report_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(origination): Json<AssignmentOrigination>,
) -> Result<(axum::http::StatusCode, Json<TenderAssignment>), ApiError> {
    let assignment =
        super::services::originate_from_report(&app_state.db, report_id, origination)
            .await
            .map_err(ApiError::from)?;

    Ok((axum::http::StatusCode::CREATED, Json(assignment)))
}
