//! Create versions table.

use sea_orm_migration::prelude::*;

use super::m20251019_000002_create_plans::Plan;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Version::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Version::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Version::PlanId).integer().not_null())
                    .col(ColumnDef::new(Version::Name).string().not_null())
                    .col(
                        ColumnDef::new(Version::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Version::EndDate).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_versions_plan")
                            .from(Version::Table, Version::PlanId)
                            .to(Plan::Table, Plan::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_versions_plan_id")
                    .table(Version::Table)
                    .col(Version::PlanId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Version::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Version {
    #[sea_orm(iden = "versions")]
    Table,
    Id,
    PlanId,
    Name,
    StartDate,
    EndDate,
}
