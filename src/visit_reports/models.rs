use super::recommendations::models::{Recommendation, RecommendationCreate, RecommendationUpdate};
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "visit_reports")]
#[crudcrate(
    generate_router,
    api_struct = "VisitReport",
    name_singular = "visit_report",
    name_plural = "visit_reports",
    description = "Field findings for a completed visit: crop observations, problems and GPS position, plus the recommended products. At most one report exists per visit; saving again updates it in place.",
    fn_get_one = get_one_report,
    fn_create = create_report,
    fn_update = update_report,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable, update_model = false)]
    pub visit_id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub plant_type: String,
    #[crudcrate(filterable)]
    pub plant_age: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    #[crudcrate(sortable, filterable)]
    pub land_area: Decimal,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(filterable, fulltext)]
    pub problems: String,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    #[crudcrate(sortable)]
    pub gps_latitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    #[crudcrate(sortable)]
    pub gps_longitude: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable)]
    pub weather_notes: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], use_target_models, list_model = false)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::visits::models::Entity",
        from = "Column::VisitId",
        to = "crate::visits::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Visits,
    #[sea_orm(has_many = "super::recommendations::models::Entity")]
    VisitRecommendations,
}

impl Related<crate::visits::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl Related<super::recommendations::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitRecommendations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_report(db: &DatabaseConnection, id: Uuid) -> Result<VisitReport, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit report not found".to_string()))?;

    let recommendation_models = model
        .find_related(super::recommendations::models::Entity)
        .all(db)
        .await?;

    let mut report: VisitReport = model.into();
    report.recommendations = recommendation_models
        .into_iter()
        .map(std::convert::Into::into)
        .collect();

    Ok(report)
}

/// POST is a save, not a plain insert: the upsert in
/// [`super::services::save_report_for_visit`] guarantees at most one report
/// per visit even when the same form is submitted twice.
async fn create_report(
    db: &DatabaseConnection,
    create_data: VisitReportCreate,
) -> Result<VisitReport, DbErr> {
    let visit_id = create_data.visit_id;
    super::services::save_report_for_visit(db, visit_id, create_data).await
}

/// Update keeps the replace-all semantics for recommendations and re-marks
/// the visit completed, in the same transaction.
async fn update_report(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: VisitReportUpdate,
) -> Result<VisitReport, DbErr> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit report not found".to_string()))?;

    let create_data = VisitReportCreate {
        visit_id: existing.visit_id,
        plant_type: update_data
            .plant_type
            .flatten()
            .unwrap_or_else(|| existing.plant_type.clone()),
        plant_age: update_data
            .plant_age
            .flatten()
            .or_else(|| existing.plant_age.clone()),
        land_area: update_data.land_area.flatten().unwrap_or(existing.land_area),
        problems: update_data
            .problems
            .flatten()
            .unwrap_or_else(|| existing.problems.clone()),
        gps_latitude: update_data
            .gps_latitude
            .flatten()
            .or(existing.gps_latitude),
        gps_longitude: update_data
            .gps_longitude
            .flatten()
            .or(existing.gps_longitude),
        weather_notes: update_data
            .weather_notes
            .flatten()
            .or_else(|| existing.weather_notes.clone()),
        recommendations: update_data
            .recommendations
            .into_iter()
            .map(|rec| super::recommendations::models::RecommendationCreate {
                visit_report_id: Some(id),
                product_name: rec.product_name.flatten().unwrap_or_default(),
                function: rec.function.flatten(),
                dosage: rec.dosage.flatten(),
                estimated_qty: rec.estimated_qty.flatten().unwrap_or(1),
                urgency: rec
                    .urgency
                    .flatten()
                    .unwrap_or(super::recommendations::models::UrgencyLevel::Segera),
                alternative_products: rec.alternative_products.flatten(),
            })
            .collect(),
    };

    super::services::save_report_for_visit(db, existing.visit_id, create_data).await
}
