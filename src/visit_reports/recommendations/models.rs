use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::entity::prelude::*;

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "urgency_level")]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    /// Immediate action
    #[sea_orm(string_value = "segera")]
    Segera,
    /// Scheduled application
    #[sea_orm(string_value = "terjadwal")]
    Terjadwal,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "visit_recommendations")]
#[crudcrate(
    generate_router,
    api_struct = "Recommendation",
    name_singular = "visit_recommendation",
    name_plural = "visit_recommendations",
    description = "Product recommendations attached to a visit report. Saving a report replaces the full set; rows here are the seed for tender assignment lines."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub visit_report_id: Option<Uuid>,
    #[crudcrate(sortable, filterable, fulltext)]
    pub product_name: String,
    #[crudcrate(filterable)]
    pub function: Option<String>,
    #[crudcrate(filterable)]
    pub dosage: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub estimated_qty: i32,
    #[crudcrate(sortable, filterable, enum_field)]
    pub urgency: UrgencyLevel,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable)]
    pub alternative_products: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::visit_reports::models::Entity",
        from = "Column::VisitReportId",
        to = "crate::visit_reports::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    VisitReports,
}

impl Related<crate::visit_reports::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
