use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "farm_status")]
#[serde(rename_all = "snake_case")]
pub enum FarmStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "farms")]
#[crudcrate(
    generate_router,
    api_struct = "Farm",
    name_singular = "farm",
    name_plural = "farms",
    description = "Farms (kebun) are the plantations consultants visit. Each farm records its commodity, area and an optional GPS position."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, fulltext)]
    pub location: String,
    #[crudcrate(sortable, filterable, fulltext)]
    pub commodity: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    #[crudcrate(sortable, filterable)]
    pub area_ha: Decimal,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = FarmStatus::Active)]
    pub status: FarmStatus,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    #[crudcrate(sortable)]
    pub latitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    #[crudcrate(sortable)]
    pub longitude: Option<Decimal>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::visits::models::Entity")]
    Visits,
}

impl Related<crate::visits::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
