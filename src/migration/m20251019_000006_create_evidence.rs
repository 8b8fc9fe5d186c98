//! Create evidence table.

use sea_orm_migration::prelude::*;

use super::m20251019_000005_create_executions::Execution;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evidence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evidence::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evidence::ExecutionId).integer().not_null())
                    .col(ColumnDef::new(Evidence::Url).string().not_null())
                    .col(ColumnDef::new(Evidence::Description).string())
                    .col(
                        ColumnDef::new(Evidence::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evidence_execution")
                            .from(Evidence::Table, Evidence::ExecutionId)
                            .to(Execution::Table, Execution::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evidence_execution_id")
                    .table(Evidence::Table)
                    .col(Evidence::ExecutionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evidence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Evidence {
    Table,
    Id,
    ExecutionId,
    Url,
    Description,
    CreatedAt,
}
