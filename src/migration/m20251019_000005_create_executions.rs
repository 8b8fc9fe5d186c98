//! Create executions table.

use sea_orm_migration::prelude::*;

use super::m20251019_000004_create_test_cases::TestCase;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Execution::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Execution::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Execution::TestCaseId).integer().not_null())
                    .col(ColumnDef::new(Execution::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Execution::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Free text, no CHECK constraint
                    .col(ColumnDef::new(Execution::Status).string().not_null())
                    .col(
                        ColumnDef::new(Execution::ActualTimeMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Execution::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_executions_test_case")
                            .from(Execution::Table, Execution::TestCaseId)
                            .to(TestCase::Table, TestCase::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_executions_test_case_id")
                    .table(Execution::Table)
                    .col(Execution::TestCaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Execution::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Execution {
    #[sea_orm(iden = "executions")]
    Table,
    Id,
    TestCaseId,
    UserId,
    Date,
    Status,
    ActualTimeMinutes,
    Notes,
}
