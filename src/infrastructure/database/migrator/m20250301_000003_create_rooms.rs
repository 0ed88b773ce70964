//! Create rooms table

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_coworkings::Coworkings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::CoworkingId).integer().not_null())
                    .col(ColumnDef::new(Rooms::Name).string().not_null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().not_null())
                    .col(ColumnDef::new(Rooms::AreaSqm).double())
                    .col(
                        ColumnDef::new(Rooms::HourlyRate)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Rooms::Capacity).gt(0))
                    .check(Expr::col(Rooms::HourlyRate).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_coworking")
                            .from(Rooms::Table, Rooms::CoworkingId)
                            .to(Coworkings::Table, Coworkings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_coworking")
                    .table(Rooms::Table)
                    .col(Rooms::CoworkingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rooms {
    Table,
    Id,
    CoworkingId,
    Name,
    Capacity,
    AreaSqm,
    HourlyRate,
    CreatedAt,
}
