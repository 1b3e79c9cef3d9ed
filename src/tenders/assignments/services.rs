use super::models::{TenderAssignment, TenderAssignmentCreate};
use super::products::models::TenderAssignProductCreate;
use crate::visit_reports::models as visit_reports;
use crate::visit_reports::recommendations::models as recommendations;
use chrono::{DateTime, Utc};
use crudcrate::CRUDResource;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A pre-populated assignment line, one per recommendation: quantity
/// defaults to 1 and price is left blank for manual editing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftLine {
    pub product_name: String,
    pub dosage: Option<String>,
    pub qty: i32,
    pub price: Option<rust_decimal::Decimal>,
    pub note: Option<String>,
}

/// Submission body for originating an assignment from a report. When
/// `products` is empty the lines are copied from the report's
/// recommendations as they exist at creation time.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignmentOrigination {
    pub assigned_by: Uuid,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub products: Vec<DraftLine>,
}

async fn recommendation_lines(
    db: &DatabaseConnection,
    report_id: Uuid,
) -> Result<Vec<DraftLine>, DbErr> {
    let recs = recommendations::Entity::find()
        .filter(recommendations::Column::VisitReportId.eq(report_id))
        .all(db)
        .await?;

    Ok(recs
        .into_iter()
        .map(|rec| DraftLine {
            product_name: rec.product_name,
            dosage: rec.dosage,
            qty: 1,
            price: None,
            note: rec.function,
        })
        .collect())
}

/// Draft lines for the tender form, copied from the report's current
/// recommendations.
pub async fn draft_from_report(
    db: &DatabaseConnection,
    report_id: Uuid,
) -> Result<Vec<DraftLine>, DbErr> {
    visit_reports::Entity::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit report not found".to_string()))?;

    recommendation_lines(db, report_id).await
}

/// Create a tender assignment from a visit report. Product lines are copies
/// of the recommendations (or the edited lines the caller submits), not
/// references to them.
pub async fn originate_from_report(
    db: &DatabaseConnection,
    report_id: Uuid,
    origination: AssignmentOrigination,
) -> Result<TenderAssignment, DbErr> {
    let report = visit_reports::Entity::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit report not found".to_string()))?;

    let lines = if origination.products.is_empty() {
        recommendation_lines(db, report_id).await?
    } else {
        origination.products
    };

    let create_data = TenderAssignmentCreate {
        visit_id: report.visit_id,
        assigned_by: origination.assigned_by,
        deadline: origination.deadline,
        message: origination.message,
        products: lines
            .into_iter()
            .map(|line| TenderAssignProductCreate {
                tender_assign_id: None,
                product_name: line.product_name,
                dosage: line.dosage,
                qty: line.qty,
                price: line.price,
                note: line.note,
            })
            .collect(),
    };

    TenderAssignment::create(db, create_data).await
}
