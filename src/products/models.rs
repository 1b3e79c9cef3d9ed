use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "products")]
#[crudcrate(
    generate_router,
    api_struct = "Product",
    name_singular = "product",
    name_plural = "products",
    description = "Products in a partner store's catalogue. Tender lines copy product data by name rather than referencing these rows."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub mitra_id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, fulltext)]
    pub brand: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable, fulltext)]
    pub description: Option<String>,
    #[crudcrate(filterable)]
    pub dosage: Option<String>,
    #[crudcrate(filterable)]
    pub unit: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[crudcrate(sortable, filterable)]
    pub base_price: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable)]
    pub note: Option<String>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::partners::models::Entity",
        from = "Column::MitraId",
        to = "crate::partners::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MitraToko,
}

impl Related<crate::partners::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MitraToko.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
