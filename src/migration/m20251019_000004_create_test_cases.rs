//! Create test_cases table.

use sea_orm_migration::prelude::*;

use super::m20251019_000003_create_versions::Version;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCase::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestCase::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestCase::VersionId).integer().not_null())
                    .col(ColumnDef::new(TestCase::Title).string_len(500).not_null())
                    .col(ColumnDef::new(TestCase::Steps).text().not_null())
                    .col(ColumnDef::new(TestCase::ExpectedResult).text().not_null())
                    .col(ColumnDef::new(TestCase::Priority).string().not_null())
                    .col(
                        ColumnDef::new(TestCase::EstimateMinutes)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(TestCase::Assignee).string().not_null())
                    .col(
                        ColumnDef::new(TestCase::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_cases_version")
                            .from(TestCase::Table, TestCase::VersionId)
                            .to(Version::Table, Version::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_cases_version_id")
                    .table(TestCase::Table)
                    .col(TestCase::VersionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestCase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestCase {
    #[sea_orm(iden = "test_cases")]
    Table,
    Id,
    VersionId,
    Title,
    Steps,
    ExpectedResult,
    Priority,
    EstimateMinutes,
    Assignee,
    CreatedAt,
}
