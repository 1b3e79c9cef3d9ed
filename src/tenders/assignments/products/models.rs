use crudcrate::EntityToModels;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Product lines describing what an assignment asks partners to offer.
/// Copied from the originating recommendations, never referenced back.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "tender_assign_products")]
#[crudcrate(
    api_struct = "TenderAssignProduct",
    name_singular = "tender_assign_product",
    name_plural = "tender_assign_products",
    description = "Product lines of a tender assignment."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub tender_assign_id: Option<Uuid>,
    #[crudcrate(sortable, filterable, fulltext)]
    pub product_name: String,
    #[crudcrate(filterable)]
    pub dosage: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub qty: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[crudcrate(sortable, filterable)]
    pub price: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable)]
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::tenders::assignments::models::Entity",
        from = "Column::TenderAssignId",
        to = "crate::tenders::assignments::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TenderAssigns,
}

impl Related<crate::tenders::assignments::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderAssigns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
