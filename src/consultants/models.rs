use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, TransactionTrait, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "consultants")]
#[crudcrate(
    generate_router,
    api_struct = "Consultant",
    name_singular = "consultant",
    name_plural = "consultants",
    description = "Consultants (konsultan) carry out farm visits and write the field reports. Creating one provisions its account and the consultant record together.",
    fn_create = create_consultant_with_account,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub full_name: String,
    #[crudcrate(sortable, filterable, fulltext)]
    pub email: String,
    #[crudcrate(sortable, filterable)]
    pub phone: String,
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

/// Account provisioning and consultant insert commit together, so a failed
/// insert can never leave an orphaned account behind.
async fn create_consultant_with_account(
    db: &DatabaseConnection,
    create_data: ConsultantCreate,
) -> Result<Consultant, DbErr> {
    let txn = db.begin().await?;

    let profile_id =
        crate::profiles::services::provision_account(&txn, &create_data.email, &create_data.full_name)
            .await?;

    let consultant = ActiveModel {
        id: Set(profile_id),
        full_name: Set(create_data.full_name),
        email: Set(create_data.email),
        phone: Set(create_data.phone),
        created_at: Set(chrono::Utc::now()),
        last_updated: Set(chrono::Utc::now()),
    };
    consultant.insert(&txn).await?;

    txn.commit().await?;

    Consultant::get_one(db, profile_id).await
}
