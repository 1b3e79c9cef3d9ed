use super::models::{TenderApproval, approve_winner, router as crudrouter};
use crate::common::auth::Role;
use crate::common::errors::ApiError;
use crate::common::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

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
            TenderApproval::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}

#[derive(Deserialize, ToSchema)]
pub struct WinnerSelection {
    pub winning_tender_offering_id: Uuid,
}

/// The approval recorded for an assignment, if a winner has been chosen.
#[utoipa::path(
    get,
    path = "/tender_assignments/{id}/winner",
    params(
        ("id" = Uuid, Path, description = "Tender assignment ID")
    ),
    responses(
        (status = 200, description = "Current winner", body = TenderApproval),
        (status = 404, description = "Assignment not found or no winner selected")
    ),
    tag = "tender_assignments"
)]
pub async fn get_winner(
    Path(assignment_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<TenderApproval>, ApiError> {
    let db = &app_state.db;

    crate::tenders::assignments::models::Entity::find_by_id(assignment_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("tender assignment", assignment_id))?;

    let approval = super::models::Entity::find()
        .filter(super::models::Column::TenderAssignId.eq(assignment_id))
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("tender approval", assignment_id))?;

    Ok(Json(approval.into()))
}

/// Select (or re-select) the winning offering for an assignment. The chosen
/// offering must have been submitted against this assignment.
#[utoipa::path(
    put,
    path = "/tender_assignments/{id}/winner",
    params(
        ("id" = Uuid, Path, description = "Tender assignment ID")
    ),
    request_body = WinnerSelection,
    responses(
        (status = 200, description = "Winner recorded", body = TenderApproval),
        (status = 404, description = "Assignment or offering not found"),
        (status = 422, description = "Offering belongs to a different assignment")
    ),
    tag = "tender_assignments"
)]
pub async fn select_winner(
    Path(assignment_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(selection): Json<WinnerSelection>,
) -> Result<Json<TenderApproval>, ApiError> {
    let approval = approve_winner(
        &app_state.db,
        assignment_id,
        selection.winning_tender_offering_id,
    )
    .await
    .map_err(|err| match err {
        DbErr::Custom(message) => ApiError::validation(message),
        other => ApiError::from(other),
    })?;

    Ok(Json(approval))
}
