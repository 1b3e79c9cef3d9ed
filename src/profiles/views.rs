use super::models::{Profile, router as crudrouter};
use crate::common::auth::Role;
use crate::common::errors::ApiError;
use crate::common::state::AppState;
use crate::roles::models as roles;
use crate::roles::models::user_roles;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
};
use serde_json::{Value, json};
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

    mutating_router = mutating_router
        .route(
            "/{id}/roles",
            get(get_profile_roles).with_state(state.clone()),
        )
        .route(
            "/{id}/roles/{role_id}",
            post(assign_role).with_state(state.clone()),
        )
        .route(
            "/{id}/roles/{role_id}",
            delete(unassign_role).with_state(state.clone()),
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
            Profile::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}

/// Roles assigned to a profile, used for display and coarse menu gating.
#[utoipa::path(
    get,
    path = "/profiles/{id}/roles",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Roles assigned to this profile"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_profile_roles(
    Path(profile_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let db = &app_state.db;

    let profile = super::models::Entity::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("profile", profile_id))?;

    let assignments = profile
        .find_related(user_roles::Entity)
        .all(db)
        .await
        .map_err(ApiError::from)?;

    let role_ids: Vec<Uuid> = assignments.iter().map(|a| a.role_id).collect();
    let role_rows = roles::Entity::find()
        .filter(roles::Column::Id.is_in(role_ids))
        .all(db)
        .await
        .map_err(ApiError::from)?;

    let data: Vec<Value> = role_rows
        .into_iter()
        .map(|r| {
            json!({
                "id": r.id,
                "name": r.name,
                "description": r.description,
            })
        })
        .collect();

    Ok(Json(json!(data)))
}

#[utoipa::path(
    post,
    path = "/profiles/{id}/roles/{role_id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID"),
        ("role_id" = Uuid, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role assigned"),
        (status = 404, description = "Profile or role not found")
    ),
    tag = "profiles"
)]
pub async fn assign_role(
    Path((profile_id, role_id)): Path<(Uuid, Uuid)>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let db = &app_state.db;

    super::models::Entity::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("profile", profile_id))?;
    roles::Entity::find_by_id(role_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("role", role_id))?;

    // Assigning the same role twice is a no-op
    let existing = user_roles::Entity::find_by_id((profile_id, role_id))
        .one(db)
        .await
        .map_err(ApiError::from)?;
    if existing.is_none() {
        let assignment = user_roles::ActiveModel {
            user_id: Set(profile_id),
            role_id: Set(role_id),
        };
        assignment.insert(db).await.map_err(ApiError::from)?;
    }

    Ok(Json(json!({"user_id": profile_id, "role_id": role_id})))
}

#[utoipa::path(
    delete,
    path = "/profiles/{id}/roles/{role_id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID"),
        ("role_id" = Uuid, Path, description = "Role ID")
    ),
    responses(
        (status = 204, description = "Role unassigned"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "profiles"
)]
pub async fn unassign_role(
    Path((profile_id, role_id)): Path<(Uuid, Uuid)>,
    State(app_state): State<AppState>,
) -> Result<axum::http::StatusCode, ApiError> {
    let db = &app_state.db;

    let assignment = user_roles::Entity::find_by_id((profile_id, role_id))
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("role assignment", profile_id))?;

    assignment.delete(db).await.map_err(ApiError::from)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
