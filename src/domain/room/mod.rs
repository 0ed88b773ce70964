//! Room aggregate
//!
//! Rooms, the equipment attached to them and the availability search.

pub mod model;
pub mod repository;

pub use model::{AvailableRoom, Equipment, NewEquipment, NewRoom, Room, RoomSearch};
pub use repository::{EquipmentRepository, RoomRepository};
