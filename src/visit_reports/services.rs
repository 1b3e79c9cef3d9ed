use super::models::{self, VisitReport, VisitReportCreate};
use super::recommendations::models as recommendations;
use crate::visits::models as visits;
use crudcrate::CRUDResource;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

/// Save the field report for a visit.
///
/// One transaction covers the whole save: the report row is upserted by
/// visit_id, the recommendation set is replaced with the submitted rows, and
/// the visit is marked completed. The original client issued these as three
/// independent writes, which allowed a saved report whose recommendations
/// never landed and a visit left unmarked; none of those partial states can
/// be observed here.
pub async fn save_report_for_visit(
    db: &DatabaseConnection,
    visit_id: Uuid,
    data: VisitReportCreate,
) -> Result<VisitReport, DbErr> {
    let txn = db.begin().await?;

    let visit = visits::Entity::find_by_id(visit_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit not found".to_string()))?;

    let existing = models::Entity::find()
        .filter(models::Column::VisitId.eq(visit_id))
        .one(&txn)
        .await?;

    let report_id = if let Some(existing) = existing {
        let report_id = existing.id;
        let mut report = existing.into_active_model();
        report.plant_type = Set(data.plant_type);
        report.plant_age = Set(data.plant_age);
        report.land_area = Set(data.land_area);
        report.problems = Set(data.problems);
        report.gps_latitude = Set(data.gps_latitude);
        report.gps_longitude = Set(data.gps_longitude);
        report.weather_notes = Set(data.weather_notes);
        report.last_updated = Set(chrono::Utc::now());
        report.update(&txn).await?;
        report_id
    } else {
        let report_id = Uuid::new_v4();
        let report = models::ActiveModel {
            id: Set(report_id),
            visit_id: Set(visit_id),
            plant_type: Set(data.plant_type),
            plant_age: Set(data.plant_age),
            land_area: Set(data.land_area),
            problems: Set(data.problems),
            gps_latitude: Set(data.gps_latitude),
            gps_longitude: Set(data.gps_longitude),
            weather_notes: Set(data.weather_notes),
            created_at: Set(chrono::Utc::now()),
            last_updated: Set(chrono::Utc::now()),
        };
        report.insert(&txn).await?;
        report_id
    };

    // Full replace: whatever set the form submitted is the set that remains
    recommendations::Entity::delete_many()
        .filter(recommendations::Column::VisitReportId.eq(report_id))
        .exec(&txn)
        .await?;

    for rec in data.recommendations {
        let mut rec_model: recommendations::ActiveModel = rec.into();
        rec_model.visit_report_id = Set(Some(report_id));
        rec_model.insert(&txn).await?;
    }

    let mut visit = visit.into_active_model();
    visit.status = Set(visits::VisitStatus::Completed);
    visit.last_updated = Set(chrono::Utc::now());
    visit.update(&txn).await?;

    txn.commit().await?;

    VisitReport::get_one(db, report_id).await
}

/// Report for a visit, with recommendations embedded. `None` when no report
/// has been submitted yet.
pub async fn report_for_visit(
    db: &DatabaseConnection,
    visit_id: Uuid,
) -> Result<Option<VisitReport>, DbErr> {
    let Some(report) = models::Entity::find()
        .filter(models::Column::VisitId.eq(visit_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    VisitReport::get_one(db, report.id).await.map(Some)
}
