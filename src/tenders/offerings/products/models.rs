use crudcrate::EntityToModels;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Product lines a partner offers against an assignment. Free-form rows:
/// they are not required to match the assignment's requested lines.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "tender_offering_products")]
#[crudcrate(
    api_struct = "TenderOfferingProduct",
    name_singular = "tender_offering_product",
    name_plural = "tender_offering_products",
    description = "Product lines of a partner's tender offering."
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub tender_offering_id: Option<Uuid>,
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
        belongs_to = "crate::tenders::offerings::models::Entity",
        from = "Column::TenderOfferingId",
        to = "crate::tenders::offerings::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TenderOfferings,
}

impl Related<crate::tenders::offerings::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
