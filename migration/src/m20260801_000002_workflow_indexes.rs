use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn index(
    manager: &SchemaManager<'_>,
    name: &str,
    table: impl IntoIden,
    col: impl IntoIden,
) -> Result<(), DbErr> {
    manager
        .create_index(
            Index::create()
                .name(name)
                .table(table.into_iden())
                .col(col.into_iden())
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign keys walked by list and embed queries
        index(manager, "idx_visits_farm_id", Visits::Table, Visits::FarmId).await?;
        index(
            manager,
            "idx_visits_consultant_id",
            Visits::Table,
            Visits::ConsultantId,
        )
        .await?;
        index(
            manager,
            "idx_visits_scheduled_date",
            Visits::Table,
            Visits::ScheduledDate,
        )
        .await?;
        index(
            manager,
            "idx_visit_recommendations_visit_report_id",
            VisitRecommendations::Table,
            VisitRecommendations::VisitReportId,
        )
        .await?;
        index(
            manager,
            "idx_products_mitra_id",
            Products::Table,
            Products::MitraId,
        )
        .await?;
        index(
            manager,
            "idx_tender_assigns_visit_id",
            TenderAssigns::Table,
            TenderAssigns::VisitId,
        )
        .await?;
        index(
            manager,
            "idx_tender_assign_products_tender_assign_id",
            TenderAssignProducts::Table,
            TenderAssignProducts::TenderAssignId,
        )
        .await?;
        index(
            manager,
            "idx_tender_offerings_tender_assign_id",
            TenderOfferings::Table,
            TenderOfferings::TenderAssignId,
        )
        .await?;
        index(
            manager,
            "idx_tender_offerings_offered_by",
            TenderOfferings::Table,
            TenderOfferings::OfferedBy,
        )
        .await?;
        index(
            manager,
            "idx_tender_offering_products_tender_offering_id",
            TenderOfferingProducts::Table,
            TenderOfferingProducts::TenderOfferingId,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_visits_farm_id",
            "idx_visits_consultant_id",
            "idx_visits_scheduled_date",
            "idx_visit_recommendations_visit_report_id",
            "idx_products_mitra_id",
            "idx_tender_assigns_visit_id",
            "idx_tender_assign_products_tender_assign_id",
            "idx_tender_offerings_tender_assign_id",
            "idx_tender_offerings_offered_by",
            "idx_tender_offering_products_tender_offering_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    FarmId,
    ConsultantId,
    ScheduledDate,
}

#[derive(DeriveIden)]
enum VisitRecommendations {
    Table,
    VisitReportId,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    MitraId,
}

#[derive(DeriveIden)]
enum TenderAssigns {
    Table,
    VisitId,
}

#[derive(DeriveIden)]
enum TenderAssignProducts {
    Table,
    TenderAssignId,
}

#[derive(DeriveIden)]
enum TenderOfferings {
    Table,
    TenderAssignId,
    OfferedBy,
}

#[derive(DeriveIden)]
enum TenderOfferingProducts {
    Table,
    TenderOfferingId,
}
