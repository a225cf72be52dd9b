//! Migration: Create the degrees table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Degrees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Degrees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Degrees::Title).string().not_null())
                    .col(ColumnDef::new(Degrees::Description).text().null())
                    .col(ColumnDef::new(Degrees::Courses).json_binary().not_null())
                    .col(
                        ColumnDef::new(Degrees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Degrees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Degrees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Degrees {
    Table,
    Id,
    Title,
    Description,
    Courses,
    CreatedAt,
    UpdatedAt,
}
