use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Add a uuid primary key column with a database-side default on Postgres.
/// SQLite (tests) relies on the application generating the id.
fn uuid_pk_column<T: IntoIden>(
    table: &mut TableCreateStatement,
    backend: sea_orm::DatabaseBackend,
    col: T,
) -> Result<(), DbErr> {
    match backend {
        sea_orm::DatabaseBackend::Postgres => {
            table.col(
                ColumnDef::new(col)
                    .uuid()
                    .not_null()
                    .primary_key()
                    .default(Expr::cust("uuid_generate_v4()")),
            );
        }
        sea_orm::DatabaseBackend::Sqlite => {
            table.col(ColumnDef::new(col).uuid().not_null().primary_key());
        }
        _ => {
            return Err(DbErr::Custom("Unsupported database backend".to_string()));
        }
    }
    Ok(())
}

/// Add an enum-typed column: native enum on Postgres, text on SQLite.
fn enum_column<C: IntoIden, E: IntoIden>(
    table: &mut TableCreateStatement,
    backend: sea_orm::DatabaseBackend,
    col: C,
    enum_type: E,
    not_null: bool,
) -> Result<(), DbErr> {
    let mut def = match backend {
        sea_orm::DatabaseBackend::Postgres => {
            let mut def = ColumnDef::new(col);
            def.custom(enum_type);
            def
        }
        sea_orm::DatabaseBackend::Sqlite => {
            let mut def = ColumnDef::new(col);
            def.text();
            def
        }
        _ => {
            return Err(DbErr::Custom("Unsupported database backend".to_string()));
        }
    };
    if not_null {
        def.not_null();
    }
    table.col(def);
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        if backend == sea_orm::DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared("CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\";")
                .await?;

            manager
                .create_type(
                    Type::create()
                        .as_enum(FarmStatus::Table)
                        .values([FarmStatus::Active, FarmStatus::Inactive])
                        .to_owned(),
                )
                .await?;
            manager
                .create_type(
                    Type::create()
                        .as_enum(AccountStatus::Table)
                        .values([AccountStatus::Active, AccountStatus::Nonactive])
                        .to_owned(),
                )
                .await?;
            manager
                .create_type(
                    Type::create()
                        .as_enum(VehicleType::Table)
                        .values([
                            VehicleType::Motorcycle,
                            VehicleType::Car,
                            VehicleType::Van,
                            VehicleType::Truck,
                        ])
                        .to_owned(),
                )
                .await?;
            manager
                .create_type(
                    Type::create()
                        .as_enum(VisitStatus::Table)
                        .values([
                            VisitStatus::Scheduled,
                            VisitStatus::Completed,
                            VisitStatus::Cancelled,
                        ])
                        .to_owned(),
                )
                .await?;
            manager
                .create_type(
                    Type::create()
                        .as_enum(UrgencyLevel::Table)
                        .values([UrgencyLevel::Segera, UrgencyLevel::Terjadwal])
                        .to_owned(),
                )
                .await?;
            manager
                .create_type(
                    Type::create()
                        .as_enum(TenderStatus::Table)
                        .values([TenderStatus::Open, TenderStatus::Closed, TenderStatus::Draft])
                        .to_owned(),
                )
                .await?;
        }

        // profiles: the account record behind consultants, drivers and partners
        let mut profiles = Table::create()
            .table(Profiles::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Profiles::Email)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Profiles::FullName).string().not_null())
            .col(
                ColumnDef::new(Profiles::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        uuid_pk_column(&mut profiles, backend, Profiles::Id)?;
        manager.create_table(profiles).await?;

        let mut roles = Table::create()
            .table(Roles::Table)
            .if_not_exists()
            .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
            .col(ColumnDef::new(Roles::Description).text())
            .col(
                ColumnDef::new(Roles::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        uuid_pk_column(&mut roles, backend, Roles::Id)?;
        manager.create_table(roles).await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("user_roles_user_id_fkey")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("user_roles_role_id_fkey")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let mut farms = Table::create()
            .table(Farms::Table)
            .if_not_exists()
            .col(ColumnDef::new(Farms::Name).string().not_null())
            .col(ColumnDef::new(Farms::Location).string().not_null())
            .col(ColumnDef::new(Farms::Commodity).string().not_null())
            .col(ColumnDef::new(Farms::AreaHa).decimal_len(12, 2).not_null())
            .col(ColumnDef::new(Farms::Latitude).decimal_len(9, 6))
            .col(ColumnDef::new(Farms::Longitude).decimal_len(9, 6))
            .col(
                ColumnDef::new(Farms::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Farms::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();
        uuid_pk_column(&mut farms, backend, Farms::Id)?;
        enum_column(&mut farms, backend, Farms::Status, FarmStatus::Table, true)?;
        manager.create_table(farms).await?;

        let mut consultants = Table::create()
            .table(Consultants::Table)
            .if_not_exists()
            .col(ColumnDef::new(Consultants::FullName).string().not_null())
            .col(ColumnDef::new(Consultants::Email).string().not_null())
            .col(ColumnDef::new(Consultants::Phone).string().not_null())
            .col(
                ColumnDef::new(Consultants::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Consultants::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("consultants_id_fkey")
                    .from(Consultants::Table, Consultants::Id)
                    .to(Profiles::Table, Profiles::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        // id is the profile id, not independently generated
        consultants.col(
            ColumnDef::new(Consultants::Id)
                .uuid()
                .not_null()
                .primary_key(),
        );
        manager.create_table(consultants).await?;

        let mut drivers = Table::create()
            .table(Drivers::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Drivers::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Drivers::Name).string().not_null())
            .col(ColumnDef::new(Drivers::Phone).string().not_null())
            .col(
                ColumnDef::new(Drivers::DriverCode)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Drivers::VehiclePlateNumber).string())
            .col(
                ColumnDef::new(Drivers::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Drivers::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("drivers_id_fkey")
                    .from(Drivers::Table, Drivers::Id)
                    .to(Profiles::Table, Profiles::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        enum_column(
            &mut drivers,
            backend,
            Drivers::Status,
            AccountStatus::Table,
            true,
        )?;
        enum_column(
            &mut drivers,
            backend,
            Drivers::VehicleType,
            VehicleType::Table,
            false,
        )?;
        manager.create_table(drivers).await?;

        let mut mitra_toko = Table::create()
            .table(MitraToko::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(MitraToko::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(MitraToko::Name).string().not_null())
            .col(ColumnDef::new(MitraToko::OwnerName).string().not_null())
            .col(ColumnDef::new(MitraToko::Address).text().not_null())
            .col(ColumnDef::new(MitraToko::City).string().not_null())
            .col(ColumnDef::new(MitraToko::Province).string().not_null())
            .col(ColumnDef::new(MitraToko::Handphone).string().not_null())
            .col(
                ColumnDef::new(MitraToko::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(MitraToko::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("mitra_toko_id_fkey")
                    .from(MitraToko::Table, MitraToko::Id)
                    .to(Profiles::Table, Profiles::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        enum_column(
            &mut mitra_toko,
            backend,
            MitraToko::Status,
            AccountStatus::Table,
            true,
        )?;
        manager.create_table(mitra_toko).await?;

        let mut products = Table::create()
            .table(Products::Table)
            .if_not_exists()
            .col(ColumnDef::new(Products::MitraId).uuid().not_null())
            .col(ColumnDef::new(Products::Name).string().not_null())
            .col(ColumnDef::new(Products::Brand).string())
            .col(ColumnDef::new(Products::Category).string())
            .col(ColumnDef::new(Products::Description).text())
            .col(ColumnDef::new(Products::Dosage).string())
            .col(ColumnDef::new(Products::Unit).string())
            .col(ColumnDef::new(Products::BasePrice).decimal_len(14, 2))
            .col(ColumnDef::new(Products::Note).text())
            .col(
                ColumnDef::new(Products::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Products::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("products_mitra_id_fkey")
                    .from(Products::Table, Products::MitraId)
                    .to(MitraToko::Table, MitraToko::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut products, backend, Products::Id)?;
        manager.create_table(products).await?;

        let mut visits = Table::create()
            .table(Visits::Table)
            .if_not_exists()
            .col(ColumnDef::new(Visits::FarmId).uuid().not_null())
            .col(ColumnDef::new(Visits::ConsultantId).uuid().not_null())
            .col(
                ColumnDef::new(Visits::ScheduledDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Visits::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(Visits::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("visits_farm_id_fkey")
                    .from(Visits::Table, Visits::FarmId)
                    .to(Farms::Table, Farms::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("visits_consultant_id_fkey")
                    .from(Visits::Table, Visits::ConsultantId)
                    .to(Consultants::Table, Consultants::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut visits, backend, Visits::Id)?;
        enum_column(
            &mut visits,
            backend,
            Visits::Status,
            VisitStatus::Table,
            true,
        )?;
        manager.create_table(visits).await?;

        // visit_id is unique: at most one report per visit, enforced by the
        // database rather than a read-then-write check in the handler
        let mut visit_reports = Table::create()
            .table(VisitReports::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(VisitReports::VisitId)
                    .uuid()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(VisitReports::PlantType).string().not_null())
            .col(ColumnDef::new(VisitReports::PlantAge).string())
            .col(
                ColumnDef::new(VisitReports::LandArea)
                    .decimal_len(12, 2)
                    .not_null(),
            )
            .col(ColumnDef::new(VisitReports::Problems).text().not_null())
            .col(ColumnDef::new(VisitReports::GpsLatitude).decimal_len(9, 6))
            .col(ColumnDef::new(VisitReports::GpsLongitude).decimal_len(9, 6))
            .col(ColumnDef::new(VisitReports::WeatherNotes).text())
            .col(
                ColumnDef::new(VisitReports::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(VisitReports::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("visit_reports_visit_id_fkey")
                    .from(VisitReports::Table, VisitReports::VisitId)
                    .to(Visits::Table, Visits::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut visit_reports, backend, VisitReports::Id)?;
        manager.create_table(visit_reports).await?;

        let mut visit_recommendations = Table::create()
            .table(VisitRecommendations::Table)
            .if_not_exists()
            .col(ColumnDef::new(VisitRecommendations::VisitReportId).uuid())
            .col(
                ColumnDef::new(VisitRecommendations::ProductName)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(VisitRecommendations::Function).string())
            .col(ColumnDef::new(VisitRecommendations::Dosage).string())
            .col(
                ColumnDef::new(VisitRecommendations::EstimatedQty)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(VisitRecommendations::AlternativeProducts).text())
            .col(
                ColumnDef::new(VisitRecommendations::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(VisitRecommendations::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("visit_recommendations_visit_report_id_fkey")
                    .from(
                        VisitRecommendations::Table,
                        VisitRecommendations::VisitReportId,
                    )
                    .to(VisitReports::Table, VisitReports::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut visit_recommendations, backend, VisitRecommendations::Id)?;
        enum_column(
            &mut visit_recommendations,
            backend,
            VisitRecommendations::Urgency,
            UrgencyLevel::Table,
            true,
        )?;
        manager.create_table(visit_recommendations).await?;

        let mut tender_assigns = Table::create()
            .table(TenderAssigns::Table)
            .if_not_exists()
            .col(ColumnDef::new(TenderAssigns::VisitId).uuid().not_null())
            .col(ColumnDef::new(TenderAssigns::AssignedBy).uuid().not_null())
            .col(
                ColumnDef::new(TenderAssigns::Deadline)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderAssigns::Message).text())
            .col(
                ColumnDef::new(TenderAssigns::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(TenderAssigns::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_assigns_visit_id_fkey")
                    .from(TenderAssigns::Table, TenderAssigns::VisitId)
                    .to(Visits::Table, Visits::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_assigns_assigned_by_fkey")
                    .from(TenderAssigns::Table, TenderAssigns::AssignedBy)
                    .to(Profiles::Table, Profiles::Id)
                    .on_delete(ForeignKeyAction::NoAction),
            )
            .to_owned();
        uuid_pk_column(&mut tender_assigns, backend, TenderAssigns::Id)?;
        enum_column(
            &mut tender_assigns,
            backend,
            TenderAssigns::Status,
            TenderStatus::Table,
            true,
        )?;
        manager.create_table(tender_assigns).await?;

        let mut tender_assign_products = Table::create()
            .table(TenderAssignProducts::Table)
            .if_not_exists()
            .col(ColumnDef::new(TenderAssignProducts::TenderAssignId).uuid())
            .col(
                ColumnDef::new(TenderAssignProducts::ProductName)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderAssignProducts::Dosage).string())
            .col(
                ColumnDef::new(TenderAssignProducts::Qty)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderAssignProducts::Price).decimal_len(14, 2))
            .col(ColumnDef::new(TenderAssignProducts::Note).text())
            .foreign_key(
                ForeignKey::create()
                    .name("tender_assign_products_tender_assign_id_fkey")
                    .from(
                        TenderAssignProducts::Table,
                        TenderAssignProducts::TenderAssignId,
                    )
                    .to(TenderAssigns::Table, TenderAssigns::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut tender_assign_products, backend, TenderAssignProducts::Id)?;
        manager.create_table(tender_assign_products).await?;

        let mut tender_offerings = Table::create()
            .table(TenderOfferings::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(TenderOfferings::TenderAssignId)
                    .uuid()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderOfferings::OfferedBy).uuid().not_null())
            .col(
                ColumnDef::new(TenderOfferings::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(TenderOfferings::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_offerings_tender_assign_id_fkey")
                    .from(TenderOfferings::Table, TenderOfferings::TenderAssignId)
                    .to(TenderAssigns::Table, TenderAssigns::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_offerings_offered_by_fkey")
                    .from(TenderOfferings::Table, TenderOfferings::OfferedBy)
                    .to(MitraToko::Table, MitraToko::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut tender_offerings, backend, TenderOfferings::Id)?;
        manager.create_table(tender_offerings).await?;

        let mut tender_offering_products = Table::create()
            .table(TenderOfferingProducts::Table)
            .if_not_exists()
            .col(ColumnDef::new(TenderOfferingProducts::TenderOfferingId).uuid())
            .col(
                ColumnDef::new(TenderOfferingProducts::ProductName)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderOfferingProducts::Dosage).string())
            .col(
                ColumnDef::new(TenderOfferingProducts::Qty)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(TenderOfferingProducts::Price).decimal_len(14, 2))
            .col(ColumnDef::new(TenderOfferingProducts::Note).text())
            .foreign_key(
                ForeignKey::create()
                    .name("tender_offering_products_tender_offering_id_fkey")
                    .from(
                        TenderOfferingProducts::Table,
                        TenderOfferingProducts::TenderOfferingId,
                    )
                    .to(TenderOfferings::Table, TenderOfferings::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(
            &mut tender_offering_products,
            backend,
            TenderOfferingProducts::Id,
        )?;
        manager.create_table(tender_offering_products).await?;

        // tender_assign_id is unique: one approval per assignment. Re-selecting
        // a winner updates this row instead of inserting a second one.
        let mut tender_approves = Table::create()
            .table(TenderApproves::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(TenderApproves::TenderAssignId)
                    .uuid()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(TenderApproves::WinningTenderOfferingId)
                    .uuid()
                    .not_null(),
            )
            .col(
                ColumnDef::new(TenderApproves::ApprovedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(TenderApproves::LastUpdated)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_approves_tender_assign_id_fkey")
                    .from(TenderApproves::Table, TenderApproves::TenderAssignId)
                    .to(TenderAssigns::Table, TenderAssigns::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("tender_approves_winning_tender_offering_id_fkey")
                    .from(
                        TenderApproves::Table,
                        TenderApproves::WinningTenderOfferingId,
                    )
                    .to(TenderOfferings::Table, TenderOfferings::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        uuid_pk_column(&mut tender_approves, backend, TenderApproves::Id)?;
        manager.create_table(tender_approves).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            TenderApproves::Table.into_iden(),
            TenderOfferingProducts::Table.into_iden(),
            TenderOfferings::Table.into_iden(),
            TenderAssignProducts::Table.into_iden(),
            TenderAssigns::Table.into_iden(),
            VisitRecommendations::Table.into_iden(),
            VisitReports::Table.into_iden(),
            Visits::Table.into_iden(),
            Products::Table.into_iden(),
            MitraToko::Table.into_iden(),
            Drivers::Table.into_iden(),
            Consultants::Table.into_iden(),
            Farms::Table.into_iden(),
            UserRoles::Table.into_iden(),
            Roles::Table.into_iden(),
            Profiles::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(Type::drop().name(FarmStatus::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_type(
                    Type::drop()
                        .name(AccountStatus::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(Type::drop().name(VehicleType::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_type(Type::drop().name(VisitStatus::Table).if_exists().to_owned())
                .await?;
            manager
                .drop_type(
                    Type::drop()
                        .name(UrgencyLevel::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(Type::drop().name(TenderStatus::Table).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Email,
    FullName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    UserId,
    RoleId,
}

#[derive(DeriveIden)]
enum Farms {
    Table,
    Id,
    Name,
    Location,
    Commodity,
    AreaHa,
    Status,
    Latitude,
    Longitude,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Consultants {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Drivers {
    Table,
    Id,
    Name,
    Phone,
    DriverCode,
    Status,
    VehiclePlateNumber,
    VehicleType,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum MitraToko {
    Table,
    Id,
    Name,
    OwnerName,
    Address,
    City,
    Province,
    Status,
    Handphone,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    MitraId,
    Name,
    Brand,
    Category,
    Description,
    Dosage,
    Unit,
    BasePrice,
    Note,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    Id,
    FarmId,
    ConsultantId,
    ScheduledDate,
    Status,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum VisitReports {
    Table,
    Id,
    VisitId,
    PlantType,
    PlantAge,
    LandArea,
    Problems,
    GpsLatitude,
    GpsLongitude,
    WeatherNotes,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum VisitRecommendations {
    Table,
    Id,
    VisitReportId,
    ProductName,
    Function,
    Dosage,
    EstimatedQty,
    Urgency,
    AlternativeProducts,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum TenderAssigns {
    Table,
    Id,
    VisitId,
    AssignedBy,
    Deadline,
    Message,
    Status,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum TenderAssignProducts {
    Table,
    Id,
    TenderAssignId,
    ProductName,
    Dosage,
    Qty,
    Price,
    Note,
}

#[derive(DeriveIden)]
enum TenderOfferings {
    Table,
    Id,
    TenderAssignId,
    OfferedBy,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum TenderOfferingProducts {
    Table,
    Id,
    TenderOfferingId,
    ProductName,
    Dosage,
    Qty,
    Price,
    Note,
}

#[derive(DeriveIden)]
enum TenderApproves {
    Table,
    Id,
    TenderAssignId,
    WinningTenderOfferingId,
    ApprovedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum FarmStatus {
    Table,
    Active,
    Inactive,
}

#[derive(DeriveIden)]
enum AccountStatus {
    Table,
    Active,
    Nonactive,
}

#[derive(DeriveIden)]
enum VehicleType {
    Table,
    Motorcycle,
    Car,
    Van,
    Truck,
}

#[derive(DeriveIden)]
enum VisitStatus {
    Table,
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(DeriveIden)]
enum UrgencyLevel {
    Table,
    Segera,
    Terjadwal,
}

#[derive(DeriveIden)]
enum TenderStatus {
    Table,
    Open,
    Closed,
    Draft,
}
