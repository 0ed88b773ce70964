//! Create equipment and room_equipment tables

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Equipment::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Equipment::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomEquipment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomEquipment::RoomId).integer().not_null())
                    .col(
                        ColumnDef::new(RoomEquipment::EquipmentId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RoomEquipment::RoomId)
                            .col(RoomEquipment::EquipmentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_equipment_room")
                            .from(RoomEquipment::Table, RoomEquipment::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_equipment_equipment")
                            .from(RoomEquipment::Table, RoomEquipment::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_equipment_equipment")
                    .table(RoomEquipment::Table)
                    .col(RoomEquipment::EquipmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomEquipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Equipment {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
pub enum RoomEquipment {
    Table,
    RoomId,
    EquipmentId,
}
