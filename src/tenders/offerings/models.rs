use super::products::models::{
    TenderOfferingProduct, TenderOfferingProductCreate, TenderOfferingProductUpdate,
};
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, IntoActiveModel, QueryFilter,
    TransactionTrait, entity::prelude::*,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "tender_offerings")]
#[crudcrate(
    generate_router,
    api_struct = "TenderOffering",
    name_singular = "tender_offering",
    name_plural = "tender_offerings",
    description = "A partner store's priced response to a tender assignment, with its own product lines.",
    fn_get_one = get_one_offering,
    fn_create = create_offering_with_products,
    fn_update = update_offering_with_products,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub tender_assign_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub offered_by: Uuid,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], use_target_models, list_model = false)]
    pub products: Vec<TenderOfferingProduct>,
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
    #[sea_orm(
        belongs_to = "crate::partners::models::Entity",
        from = "Column::OfferedBy",
        to = "crate::partners::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MitraToko,
    #[sea_orm(has_many = "super::products::models::Entity")]
    TenderOfferingProducts,
}

impl Related<crate::tenders::assignments::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderAssigns.def()
    }
}

impl Related<crate::partners::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MitraToko.def()
    }
}

impl Related<super::products::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderOfferingProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_offering(db: &DatabaseConnection, id: Uuid) -> Result<TenderOffering, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Tender offering not found".to_string()))?;

    let product_models = model
        .find_related(super::products::models::Entity)
        .all(db)
        .await?;

    let mut offering: TenderOffering = model.into();
    offering.products = product_models
        .into_iter()
        .map(std::convert::Into::into)
        .collect();

    Ok(offering)
}

/// Offering and its product lines are inserted in one transaction. The
/// assignment must exist and still be open for offers.
async fn create_offering_with_products(
    db: &DatabaseConnection,
    create_data: TenderOfferingCreate,
) -> Result<TenderOffering, DbErr> {
    let assignment =
        crate::tenders::assignments::models::Entity::find_by_id(create_data.tender_assign_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Tender assignment not found".to_string()))?;

    if assignment.status == crate::tenders::assignments::models::TenderStatus::Closed {
        return Err(DbErr::Custom(
            "Business rule: assignment is closed for offers".to_string(),
        ));
    }

    let products = create_data.products.clone();

    let txn = db.begin().await?;

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(&txn).await?;
    let offering_id = inserted.id;

    for product in products {
        let mut product_model: super::products::models::ActiveModel = product.into();
        product_model.tender_offering_id = Set(Some(offering_id));
        product_model.insert(&txn).await?;
    }

    txn.commit().await?;

    TenderOffering::get_one(db, offering_id).await
}

/// Editing an offering replaces its product lines wholesale; row and lines
/// commit together.
async fn update_offering_with_products(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: TenderOfferingUpdate,
) -> Result<TenderOffering, DbErr> {
    let products = update_data.products.clone();

    let txn = db.begin().await?;

    let existing = Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Tender offering not found".to_string()))?;

    let existing_active = existing.into_active_model();
    let updated = update_data.merge_into_activemodel(existing_active)?;
    updated.update(&txn).await?;

    super::products::models::Entity::delete_many()
        .filter(super::products::models::Column::TenderOfferingId.eq(id))
        .exec(&txn)
        .await?;

    for product in products {
        let product_model = super::products::models::ActiveModel {
            id: Set(Uuid::new_v4()),
            tender_offering_id: Set(Some(id)),
            product_name: Set(product.product_name.flatten().unwrap_or_default()),
            dosage: Set(product.dosage.flatten()),
            qty: Set(product.qty.flatten().unwrap_or(1)),
            price: Set(product.price.flatten()),
            note: Set(product.note.flatten()),
        };
        product_model.insert(&txn).await?;
    }

    txn.commit().await?;

    TenderOffering::get_one(db, id).await
}
