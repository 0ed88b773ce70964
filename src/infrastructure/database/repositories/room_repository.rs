//! SeaORM implementation of RoomRepository
//!
//! The availability search is one query: occupied rooms and, when equipment
//! is required, fully-equipped rooms are sub-selects on the room filter.
//! Equipment names are loaded with a second query for the matched rooms only.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set,
};

use crate::domain::booking::BookingStatus;
use crate::domain::room::{AvailableRoom, NewRoom, Room, RoomRepository, RoomSearch};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, coworking, equipment, room, room_equipment};
use crate::shared::distinct_ids;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Equipment names per room, alphabetical
    async fn equipment_names(&self, room_ids: Vec<i32>) -> DomainResult<HashMap<i32, Vec<String>>> {
        let mut names: HashMap<i32, Vec<String>> = HashMap::new();
        if room_ids.is_empty() {
            return Ok(names);
        }

        let links = room_equipment::Entity::find()
            .filter(room_equipment::Column::RoomId.is_in(room_ids))
            .find_also_related(equipment::Entity)
            .all(&self.db)
            .await?;

        for (link, item) in links {
            if let Some(item) = item {
                names.entry(link.room_id).or_default().push(item.name);
            }
        }
        for list in names.values_mut() {
            list.sort();
        }
        Ok(names)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model, coworking_name: Option<String>) -> Room {
    Room {
        id: m.id,
        coworking_id: m.coworking_id,
        name: m.name,
        capacity: m.capacity,
        area_sqm: m.area_sqm,
        hourly_rate: m.hourly_rate.round_dp(2),
        created_at: m.created_at,
        coworking_name,
    }
}

fn active_statuses() -> Vec<&'static str> {
    BookingStatus::ACTIVE.iter().map(|s| s.as_str()).collect()
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, r: NewRoom) -> DomainResult<Room> {
        debug!("Creating room '{}' in coworking {}", r.name, r.coworking_id);

        let owner = coworking::Entity::find_by_id(r.coworking_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Coworking", r.coworking_id))?;

        let model = room::ActiveModel {
            coworking_id: Set(r.coworking_id),
            name: Set(r.name),
            capacity: Set(r.capacity),
            area_sqm: Set(r.area_sqm),
            hourly_rate: Set(r.hourly_rate),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await?;
        Ok(model_to_domain(saved, Some(owner.name)))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let found = room::Entity::find_by_id(id)
            .find_also_related(coworking::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(|(r, c)| model_to_domain(r, c.map(|c| c.name))))
    }

    async fn find_by_coworking(&self, coworking_id: i32) -> DomainResult<Vec<Room>> {
        let rows = room::Entity::find()
            .filter(room::Column::CoworkingId.eq(coworking_id))
            .order_by_asc(room::Column::Name)
            .order_by_asc(room::Column::Id)
            .find_also_related(coworking::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(r, c)| model_to_domain(r, c.map(|c| c.name)))
            .collect())
    }

    async fn search_available(&self, search: &RoomSearch) -> DomainResult<Vec<AvailableRoom>> {
        let window = &search.window;

        // Rooms holding an active booking that intersects [start, end)
        let occupied = booking::Entity::find()
            .select_only()
            .column(booking::Column::RoomId)
            .filter(booking::Column::Status.is_in(active_statuses()))
            .filter(booking::Column::StartsAt.lt(window.ends_at()))
            .filter(booking::Column::EndsAt.gt(window.starts_at()))
            .into_query();

        let mut query = room::Entity::find().filter(room::Column::Id.not_in_subquery(occupied));

        let required = distinct_ids(&search.equipment_ids);
        if !required.is_empty() {
            let needed = required.len() as i64;
            let equipped = room_equipment::Entity::find()
                .select_only()
                .column(room_equipment::Column::RoomId)
                .filter(room_equipment::Column::EquipmentId.is_in(required))
                .group_by(room_equipment::Column::RoomId)
                .having(
                    Expr::expr(
                        Expr::col((room_equipment::Entity, room_equipment::Column::EquipmentId))
                            .count(),
                    )
                    .eq(needed),
                )
                .into_query();
            query = query.filter(room::Column::Id.in_subquery(equipped));
        }

        if let Some(min_capacity) = search.min_capacity {
            query = query.filter(room::Column::Capacity.gte(min_capacity));
        }
        if let Some(max_rate) = search.max_rate {
            query = query.filter(room::Column::HourlyRate.lte(max_rate));
        }

        let rows = query
            .order_by_asc(room::Column::HourlyRate)
            .order_by_asc(room::Column::Id)
            .find_also_related(coworking::Entity)
            .all(&self.db)
            .await?;

        let mut names = self
            .equipment_names(rows.iter().map(|(r, _)| r.id).collect())
            .await?;

        let mut available = Vec::with_capacity(rows.len());
        for (r, c) in rows {
            let c = c.ok_or_else(|| {
                DomainError::Integrity(format!("room {} has no coworking", r.id))
            })?;
            let equipment = names.remove(&r.id).unwrap_or_default();
            available.push(AvailableRoom {
                room: model_to_domain(r, Some(c.name.clone())),
                coworking_name: c.name,
                coworking_address: c.address,
                equipment,
            });
        }

        debug!(
            "Availability search {} - {}: {} room(s)",
            window.starts_at(),
            window.ends_at(),
            available.len()
        );
        Ok(available)
    }
}
