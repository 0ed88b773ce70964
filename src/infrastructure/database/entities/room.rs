//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub coworking_id: i32,
    pub name: String,
    pub capacity: i32,
    #[sea_orm(nullable)]
    pub area_sqm: Option<f64>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_rate: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coworking::Entity",
        from = "Column::CoworkingId",
        to = "super::coworking::Column::Id"
    )]
    Coworking,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::room_equipment::Entity")]
    RoomEquipment,
}

impl Related<super::coworking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coworking.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::room_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
