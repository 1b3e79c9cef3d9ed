use super::models::{Visit, router as crudrouter};
use crate::common::auth::Role;
use crate::common::state::AppState;
use axum::routing::{get, post};
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use crudcrate::CRUDResource;
use utoipa_axum::router::OpenApiRouter;

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut mutating_router = crudrouter(&state.db.clone());

    // Field report submission lives under the visit it belongs to
    mutating_router = mutating_router
        .route(
            "/{id}/report",
            get(crate::visit_reports::views::get_visit_report).with_state(state.clone()),
        )
        .route(
            "/{id}/report",
            post(crate::visit_reports::views::save_visit_report).with_state(state.clone()),
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
            Visit::RESOURCE_NAME_PLURAL
        );
    }

    mutating_router
}
