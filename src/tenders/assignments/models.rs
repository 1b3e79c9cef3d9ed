use super::products::models::{
    TenderAssignProduct, TenderAssignProductCreate, TenderAssignProductUpdate,
};
use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels, traits::MergeIntoActiveModel};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, IntoActiveModel, QueryFilter,
    TransactionTrait, entity::prelude::*,
};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "tender_status")]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "draft")]
    Draft,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, EntityToModels)]
#[sea_orm(table_name = "tender_assigns")]
#[crudcrate(
    generate_router,
    api_struct = "TenderAssignment",
    name_singular = "tender_assignment",
    name_plural = "tender_assignments",
    description = "A request for products originated from a visit's recommendations, sent out for partner offers with a deadline.",
    fn_get_one = get_one_assignment,
    fn_create = create_assignment_with_products,
    fn_update = update_assignment_with_products,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub visit_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub assigned_by: Uuid,
    #[crudcrate(sortable, filterable)]
    pub deadline: DateTime<Utc>,
    #[sea_orm(column_type = "Text", nullable)]
    #[crudcrate(filterable, fulltext)]
    pub message: Option<String>,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = TenderStatus::Open)]
    pub status: TenderStatus,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = vec![], use_target_models, list_model = false)]
    pub products: Vec<TenderAssignProduct>,
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
    #[sea_orm(has_many = "super::products::models::Entity")]
    TenderAssignProducts,
    #[sea_orm(has_many = "crate::tenders::offerings::models::Entity")]
    TenderOfferings,
}

impl Related<crate::visits::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl Related<super::products::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderAssignProducts.def()
    }
}

impl Related<crate::tenders::offerings::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn get_one_assignment(db: &DatabaseConnection, id: Uuid) -> Result<TenderAssignment, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Tender assignment not found".to_string()))?;

    let product_models = model
        .find_related(super::products::models::Entity)
        .all(db)
        .await?;

    let mut assignment: TenderAssignment = model.into();
    assignment.products = product_models
        .into_iter()
        .map(std::convert::Into::into)
        .collect();

    Ok(assignment)
}

/// Assignment and its product lines are inserted in one transaction.
async fn create_assignment_with_products(
    db: &DatabaseConnection,
    create_data: TenderAssignmentCreate,
) -> Result<TenderAssignment, DbErr> {
    let products = create_data.products.clone();

    let txn = db.begin().await?;

    let active_model: ActiveModel = create_data.into();
    let inserted = active_model.insert(&txn).await?;
    let assignment_id = inserted.id;

    for product in products {
        let mut product_model: super::products::models::ActiveModel = product.into();
        product_model.tender_assign_id = Set(Some(assignment_id));
        product_model.insert(&txn).await?;
    }

    txn.commit().await?;

    TenderAssignment::get_one(db, assignment_id).await
}

/// Update replaces the product line set wholesale, in the same transaction
/// as the assignment row itself.
async fn update_assignment_with_products(
    db: &DatabaseConnection,
    id: Uuid,
    update_data: TenderAssignmentUpdate,
) -> Result<TenderAssignment, DbErr> {
    let products = update_data.products.clone();

    let txn = db.begin().await?;

    let existing = Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Tender assignment not found".to_string()))?;

    let existing_active = existing.into_active_model();
    let updated = update_data.merge_into_activemodel(existing_active)?;
    updated.update(&txn).await?;

    super::products::models::Entity::delete_many()
        .filter(super::products::models::Column::TenderAssignId.eq(id))
        .exec(&txn)
        .await?;

    for product in products {
        let product_model = super::products::models::ActiveModel {
            id: Set(Uuid::new_v4()),
            tender_assign_id: Set(Some(id)),
            product_name: Set(product.product_name.flatten().unwrap_or_default()),
            dosage: Set(product.dosage.flatten()),
            qty: Set(product.qty.flatten().unwrap_or(1)),
            price: Set(product.price.flatten()),
            note: Set(product.note.flatten()),
        };
        product_model.insert(&txn).await?;
    }

    txn.commit().await?;

    TenderAssignment::get_one(db, id).await
}
