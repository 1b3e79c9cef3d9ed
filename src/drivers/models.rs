use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, TransactionTrait, entity::prelude::*};

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "nonactive")]
    Nonactive,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vehicle_type")]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[sea_orm(string_value = "motorcycle")]
    Motorcycle,
    #[sea_orm(string_value = "car")]
    Car,
    #[sea_orm(string_value = "van")]
    Van,
    #[sea_orm(string_value = "truck")]
    Truck,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "drivers")]
#[crudcrate(
    generate_router,
    api_struct = "Driver",
    name_singular = "driver",
    name_plural = "drivers",
    description = "Drivers handle logistics for approved tenders. Creating one provisions its account and the driver record in a single transaction.",
    fn_create = create_driver_with_account,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable, fulltext)]
    pub name: String,
    #[crudcrate(sortable, filterable)]
    pub phone: String,
    #[sea_orm(unique)]
    #[crudcrate(sortable, filterable, create_model = false, on_create = crate::drivers::services::generate_driver_code())]
    pub driver_code: String,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = DriverStatus::Active)]
    pub status: DriverStatus,
    #[crudcrate(sortable, filterable)]
    pub vehicle_plate_number: Option<String>,
    #[crudcrate(sortable, filterable)]
    pub vehicle_type: Option<VehicleType>,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    /// Email for the provisioned account; not stored on the driver row itself.
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = String::new(), update_model = false, list_model = false)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Account + driver row in one transaction (the original two-step flow could
/// strand an auth account when the second insert failed).
async fn create_driver_with_account(
    db: &DatabaseConnection,
    create_data: DriverCreate,
) -> Result<Driver, DbErr> {
    if create_data.email.is_empty() {
        return Err(DbErr::Custom(
            "Validation failed: email is required to provision a driver account".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let profile_id =
        crate::profiles::services::provision_account(&txn, &create_data.email, &create_data.name)
            .await?;

    let driver = ActiveModel {
        id: Set(profile_id),
        name: Set(create_data.name),
        phone: Set(create_data.phone),
        driver_code: Set(super::services::generate_driver_code()),
        status: Set(DriverStatus::Active),
        vehicle_plate_number: Set(create_data.vehicle_plate_number),
        vehicle_type: Set(create_data.vehicle_type),
        created_at: Set(chrono::Utc::now()),
        last_updated: Set(chrono::Utc::now()),
    };
    driver.insert(&txn).await?;

    txn.commit().await?;

    Driver::get_one(db, profile_id).await
}
