//! Room and equipment repository interfaces

use async_trait::async_trait;

use super::model::{AvailableRoom, Equipment, NewEquipment, NewRoom, Room, RoomSearch};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: NewRoom) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Rooms of one coworking ordered by name, with the coworking name filled in
    async fn find_by_coworking(&self, coworking_id: i32) -> DomainResult<Vec<Room>>;

    /// Rooms with no pending/confirmed booking intersecting `search.window`
    /// that satisfy every supplied filter, cheapest first
    async fn search_available(&self, search: &RoomSearch) -> DomainResult<Vec<AvailableRoom>>;
}

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Insert by name, or update the description of the existing row
    async fn upsert(&self, equipment: NewEquipment) -> DomainResult<Equipment>;

    /// Link equipment to a room; linking twice is a no-op
    async fn attach_to_room(&self, room_id: i32, equipment_id: i32) -> DomainResult<()>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Equipment>>;

    /// All equipment ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Equipment>>;
}
