//! SeaORM implementation of EquipmentRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::room::{Equipment, EquipmentRepository, NewEquipment};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{equipment, room_equipment};

pub struct SeaOrmEquipmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmEquipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: equipment::Model) -> Equipment {
    Equipment {
        id: m.id,
        name: m.name,
        description: m.description,
    }
}

#[async_trait]
impl EquipmentRepository for SeaOrmEquipmentRepository {
    async fn upsert(&self, e: NewEquipment) -> DomainResult<Equipment> {
        debug!("Upserting equipment: {}", e.name);

        let name = e.name.clone();
        let model = equipment::ActiveModel {
            name: Set(e.name),
            description: Set(e.description),
            ..Default::default()
        };
        equipment::Entity::insert(model)
            .on_conflict(
                OnConflict::column(equipment::Column::Name)
                    .update_column(equipment::Column::Description)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        // Re-read by natural key: the upsert may have touched an existing row.
        let saved = equipment::Entity::find()
            .filter(equipment::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::Integrity(format!("equipment '{}' vanished after upsert", name)))?;
        Ok(model_to_domain(saved))
    }

    async fn attach_to_room(&self, room_id: i32, equipment_id: i32) -> DomainResult<()> {
        debug!("Attaching equipment {} to room {}", equipment_id, room_id);

        let link = room_equipment::ActiveModel {
            room_id: Set(room_id),
            equipment_id: Set(equipment_id),
        };
        room_equipment::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    room_equipment::Column::RoomId,
                    room_equipment::Column::EquipmentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Equipment>> {
        let model = equipment::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Equipment>> {
        let models = equipment::Entity::find()
            .order_by_asc(equipment::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
