use crate::common::errors::ApiError;
use crate::common::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use serde_json::{Value, json};
use uuid::Uuid;

/// Surat jalan for a decided tender: the assignment, its originating visit
/// and farm, the winning offering with product lines and total value, and the
/// winning partner. Read-only; exists once a winner has been approved.
#[utoipa::path(
    get,
    path = "/tender_assignments/{id}/delivery_order",
    params(
        ("id" = Uuid, Path, description = "Tender assignment ID")
    ),
    responses(
        (status = 200, description = "Delivery order for the approved winner"),
        (status = 404, description = "Assignment not found or no winner approved")
    ),
    tag = "tender_assignments"
)]
pub async fn get_delivery_order(
    Path(assignment_id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let db = &app_state.db;

    let assignment = super::assignments::models::Entity::find_by_id(assignment_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("tender assignment", assignment_id))?;

    let approval = super::approvals::models::Entity::find()
        .filter(super::approvals::models::Column::TenderAssignId.eq(assignment_id))
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("tender approval", assignment_id))?;

    let offering =
        super::offerings::models::Entity::find_by_id(approval.winning_tender_offering_id)
            .one(db)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::not_found("tender offering", approval.winning_tender_offering_id)
            })?;

    let products = offering
        .find_related(super::offerings::products::models::Entity)
        .all(db)
        .await
        .map_err(ApiError::from)?;

    let partner = crate::partners::models::Entity::find_by_id(offering.offered_by)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("partner", offering.offered_by))?;

    let visit = crate::visits::models::Entity::find_by_id(assignment.visit_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("visit", assignment.visit_id))?;

    let farm = crate::farms::models::Entity::find_by_id(visit.farm_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("farm", visit.farm_id))?;

    let total_value: Decimal = products
        .iter()
        .filter_map(|p| p.price.map(|price| price * Decimal::from(p.qty)))
        .sum();

    let product_lines: Vec<Value> = products
        .into_iter()
        .map(|p| {
            json!({
                "product_name": p.product_name,
                "dosage": p.dosage,
                "qty": p.qty,
                "price": p.price,
                "note": p.note,
            })
        })
        .collect();

    Ok(Json(json!({
        "assignment": {
            "id": assignment.id,
            "deadline": assignment.deadline,
            "message": assignment.message,
            "status": assignment.status,
        },
        "visit": {
            "id": visit.id,
            "scheduled_date": visit.scheduled_date,
            "farm": {
                "id": farm.id,
                "name": farm.name,
                "location": farm.location,
                "commodity": farm.commodity,
            },
        },
        "winning_offering": {
            "id": offering.id,
            "created_at": offering.created_at,
            "products": product_lines,
            "total_value": total_value,
        },
        "partner": {
            "id": partner.id,
            "name": partner.name,
            "address": partner.address,
            "city": partner.city,
            "handphone": partner.handphone,
        },
        "approved_at": approval.approved_at,
    })))
}
