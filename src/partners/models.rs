use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, TransactionTrait, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "nonactive")]
    Nonactive,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "mitra_toko")]
#[crudcrate(
    generate_router,
    api_struct = "Partner",
    name_singular = "partner",
    name_plural = "partners",
    description = "Partner stores (mitra/toko) own products and bid on tender assignments. Creating one provisions its account and the store record in a single transaction.",
    fn_create = create_partner_with_account,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable, fulltext)]
    pub owner_name: String,
    #[sea_orm(column_type = "Text")]
    #[crudcrate(filterable, fulltext)]
    pub address: String,
    #[crudcrate(sortable, filterable)]
    pub city: String,
    #[crudcrate(sortable, filterable)]
    pub province: String,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = PartnerStatus::Active)]
    pub status: PartnerStatus,
    #[crudcrate(sortable, filterable)]
    pub handphone: String,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    /// Email for the provisioned account; not stored on the store row itself.
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = String::new(), update_model = false, list_model = false)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::products::models::Entity")]
    Products,
    #[sea_orm(has_many = "crate::tenders::offerings::models::Entity")]
    TenderOfferings,
}

impl Related<crate::products::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<crate::tenders::offerings::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenderOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Account + store row in one transaction, mirroring the driver flow.
async fn create_partner_with_account(
    db: &DatabaseConnection,
    create_data: PartnerCreate,
) -> Result<Partner, DbErr> {
    if create_data.email.is_empty() {
        return Err(DbErr::Custom(
            "Validation failed: email is required to provision a partner account".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let profile_id = crate::profiles::services::provision_account(
        &txn,
        &create_data.email,
        &create_data.owner_name,
    )
    .await?;

    let partner = ActiveModel {
        id: Set(profile_id),
        name: Set(create_data.name),
        owner_name: Set(create_data.owner_name),
        address: Set(create_data.address),
        city: Set(create_data.city),
        province: Set(create_data.province),
        status: Set(PartnerStatus::Active),
        handphone: Set(create_data.handphone),
        created_at: Set(chrono::Utc::now()),
        last_updated: Set(chrono::Utc::now()),
    };
    partner.insert(&txn).await?;

    txn.commit().await?;

    Partner::get_one(db, profile_id).await
}
