//! Create coworkings table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coworkings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coworkings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Coworkings::Name).string().not_null())
                    .col(ColumnDef::new(Coworkings::Address).string_len(500).not_null())
                    .col(ColumnDef::new(Coworkings::Description).text())
                    .col(
                        ColumnDef::new(Coworkings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coworkings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Coworkings {
    Table,
    Id,
    Name,
    Address,
    Description,
    CreatedAt,
}
