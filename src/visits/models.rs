use chrono::{DateTime, Utc};
use crudcrate::{CRUDResource, EntityToModels};
use sea_orm::{QueryOrder, QuerySelect, entity::prelude::*};

/// Visit lifecycle. Transitions are deliberately unconstrained: any status
/// may follow any other (a cancelled visit can be reopened). `Completed` is
/// also set as a side effect of report submission.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "visit_status")]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, EntityToModels)]
#[sea_orm(table_name = "visits")]
#[crudcrate(
    generate_router,
    api_struct = "Visit",
    name_singular = "visit",
    name_plural = "visits",
    description = "Scheduled meetings between a consultant and a farm. A visit starts as scheduled and is completed when its field report is submitted.",
    fn_get_one = get_one_visit,
    fn_get_all = get_all_visits,
)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[crudcrate(primary_key, update_model = false, create_model = false, on_create = Uuid::new_v4())]
    pub id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub farm_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub consultant_id: Uuid,
    #[crudcrate(sortable, filterable)]
    pub scheduled_date: DateTime<Utc>,
    #[crudcrate(sortable, filterable, enum_field, create_model = false, on_create = VisitStatus::Scheduled)]
    pub status: VisitStatus,
    #[crudcrate(update_model = false, create_model = false, on_create = chrono::Utc::now(), sortable, list_model = false)]
    pub created_at: DateTime<Utc>,
    #[crudcrate(update_model = false, create_model = false, on_update = chrono::Utc::now(), on_create = chrono::Utc::now(), sortable)]
    pub last_updated: DateTime<Utc>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = None, create_model = false, update_model = false)]
    pub farm_name: Option<String>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = None, create_model = false, update_model = false)]
    pub consultant_name: Option<String>,
    #[sea_orm(ignore)]
    #[crudcrate(non_db_attr = true, default = None, create_model = false, update_model = false, list_model = false)]
    pub report_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::farms::models::Entity",
        from = "Column::FarmId",
        to = "crate::farms::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Farms,
    #[sea_orm(
        belongs_to = "crate::consultants::models::Entity",
        from = "Column::ConsultantId",
        to = "crate::consultants::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Consultants,
    #[sea_orm(has_one = "crate::visit_reports::models::Entity")]
    VisitReports,
    #[sea_orm(has_many = "crate::tenders::assignments::models::Entity")]
    TenderAssigns,
}

impl Related<crate::farms::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farms.def()
    }
}

impl Related<crate::consultants::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consultants.def()
    }
}

impl Related<crate::visit_reports::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

async fn load_names(
    db: &DatabaseConnection,
    farm_id: Uuid,
    consultant_id: Uuid,
) -> Result<(Option<String>, Option<String>), DbErr> {
    let farm_name = crate::farms::models::Entity::find_by_id(farm_id)
        .one(db)
        .await?
        .map(|f| f.name);
    let consultant_name = crate::consultants::models::Entity::find_by_id(consultant_id)
        .one(db)
        .await?
        .map(|c| c.full_name);
    Ok((farm_name, consultant_name))
}

/// `get_one` enriched with farm name, consultant name and the report id when
/// a field report has been submitted.
async fn get_one_visit(db: &DatabaseConnection, id: Uuid) -> Result<Visit, DbErr> {
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Visit not found".to_string()))?;

    let (farm_name, consultant_name) = load_names(db, model.farm_id, model.consultant_id).await?;

    let report_id = model
        .find_related(crate::visit_reports::models::Entity)
        .one(db)
        .await?
        .map(|r| r.id);

    let mut visit: Visit = model.into();
    visit.farm_name = farm_name;
    visit.consultant_name = consultant_name;
    visit.report_id = report_id;

    Ok(visit)
}

/// `get_all` joined with farm and consultant names, mirroring the visit list
/// the platform shows.
async fn get_all_visits(
    db: &DatabaseConnection,
    condition: &sea_orm::Condition,
    order_column: Column,
    order_direction: sea_orm::Order,
    offset: u64,
    limit: u64,
) -> Result<Vec<VisitList>, DbErr> {
    let models = Entity::find()
        .filter(condition.clone())
        .order_by(order_column, order_direction)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;

    let mut visits: Vec<VisitList> = Vec::new();
    for model in models {
        let (farm_name, consultant_name) =
            load_names(db, model.farm_id, model.consultant_id).await?;
        let mut visit_list = VisitList::from(model);
        visit_list.farm_name = farm_name;
        visit_list.consultant_name = consultant_name;
        visits.push(visit_list);
    }

    Ok(visits)
}
