use super::models::{VisitReport, VisitReportCreate, router as crudrouter};
use super::recommendations::models::RecommendationCreate;
use crate::common::auth::Role;
use crate::common::errors::ApiError;
use crate::common::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

    mutating_router = mutating_router
        .route(
            "/{id}/tender_draft",
            get(crate::tenders::assignments::views::get_tender_draft).with_state(state.clone()),
        )
        .route(
            "/{id}/tender_assignments",
            post(crate::tenders::assignments::views::create_assignment_from_report)
                .with_state(state.clone()),
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
            VisitReport::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}

/// Report submission body; the visit id comes from the path.
#[derive(Deserialize, ToSchema)]
pub struct VisitReportSubmission {
    pub plant_type: String,
    #[serde(default)]
    pub plant_age: Option<String>,
    pub land_area: Decimal,
    pub problems: String,
    #[serde(default)]
    pub gps_latitude: Option<Decimal>,
    #[serde(default)]
    pub gps_longitude: Option<Decimal>,
    #[serde(default)]
    pub weather_notes: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationCreate>,
}

/// Submit (or re-submit) the field report for a visit. Upserts the report,
/// replaces its recommendations and marks the visit completed, atomically.
#[utoipa::path(
    post,
    path = "/visits/{id}/report",
    params(
        ("id" = Uuid, Path, description = "Visit ID the report belongs to")
    ),
    request_body = VisitReportSubmission,
    responses(
        (status = 200, description = "Report saved", body = VisitReport),
        (status = 404, description = "Visit not found")
    ),
    tag = "visits"
)]
pub async fn save_visit_report(
    Path(visit_id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(submission): Json<VisitReportSubmission>,
) -> Result<Json<VisitReport>, ApiError> {
    let create_data = VisitReportCreate {
        visit_id,
        plant_type: submission.plant_type,
        plant_age: submission.plant_age,
        land_area: submission.land_area,
        problems: submission.problems,
        gps_latitude: submission.gps_latitude,
        gps_longitude: submission.gps_longitude,
        weather_notes: submission.weather_notes,
        recommendations: submission.recommendations,
    };

    let report = super::services::save_report_for_visit(&app_state.db, visit_id, create_data)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(report))
}

/// Field report for a visit, with recommendations embedded.
#[utoipa::path(
    get,
    path = "/visits/{id}/report",
    params(
        ("id" = Uuid, Path, description = "Visit ID")
    ),
    responses(
        (status = 200, description = "The visit's report", body = VisitReport),
        (status = 404, description = "Visit has no report")
    ),
    tag = "visits"
)]
pub async fn get_visit_report(
    Path(visit_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<VisitReport>, ApiError> {
    let report = super::services::report_for_visit(&app_state.db, visit_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("visit report for visit", visit_id))?;

    Ok(Json(report))
}
