use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, QueryFilter, entity::prelude::*};

/// One row per assignment: `tender_assign_id` carries a unique constraint, so
/// selecting a different winner updates the existing row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "tender_approves")]
#[crudcrate(
    generate_router,
    api_struct = "TenderApproval",
    name_singular = "tender_approval",
    name_plural = "tender_approves",
    description = "The winning offering chosen for a tender assignment.",
    fn_create = record_approval,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable)]
    pub tender_assign_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub winning_tender_offering_id: Uuid,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable)]
    pub approved_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
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
        belongs_to = "crate::tenders::offerings::models::Entity",
        from = "Column::WinningTenderOfferingId",
        to = "crate::tenders::offerings::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TenderOfferings,
}

impl Related<crate::tenders::assignments::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderAssigns.def()
    }
}

impl Related<crate::tenders::offerings::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Records the winner for an assignment. The offering must exist and must
/// have been submitted against that same assignment; a prior approval for the
/// assignment is overwritten rather than duplicated.
pub async fn approve_winner(
    db: &DatabaseConnection,
    tender_assign_id: Uuid,
    winning_tender_offering_id: Uuid,
) -> Result<TenderApproval, DbErr> {
    crate::tenders::assignments::models::Entity::find_by_id(tender_assign_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Tender assignment not found".to_string()))?;

    let offering =
        crate::tenders::offerings::models::Entity::find_by_id(winning_tender_offering_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Tender offering not found".to_string()))?;

    if offering.tender_assign_id != tender_assign_id {
        return Err(DbErr::Custom(
            "Business rule: offering does not belong to this assignment".to_string(),
        ));
    }

    let existing = Entity::find()
        .filter(Column::TenderAssignId.eq(tender_assign_id))
        .one(db)
        .await?;

    let approval_id = match existing {
        Some(row) => {
            let mut active: ActiveModel = row.clone().into();
            active.winning_tender_offering_id = Set(winning_tender_offering_id);
            active.last_updated = Set(chrono::Utc::now());
            active.update(db).await?;
            row.id
        }
        None => {
            let active = ActiveModel {
                id: Set(Uuid::new_v4()),
                tender_assign_id: Set(tender_assign_id),
                winning_tender_offering_id: Set(winning_tender_offering_id),
                approved_at: Set(chrono::Utc::now()),
                last_updated: Set(chrono::Utc::now()),
            };
            active.insert(db).await?.id
        }
    };

    TenderApproval::get_one(db, approval_id).await
}

async fn record_approval(
    db: &DatabaseConnection,
    create_data: TenderApprovalCreate,
) -> Result<TenderApproval, DbErr> {
    approve_winner(
        db,
        create_data.tender_assign_id,
        create_data.winning_tender_offering_id,
    )
    .await
}
