//! Database entities module

pub mod booking;
pub mod coworking;
pub mod equipment;
pub mod payment;
pub mod room;
pub mod room_equipment;
pub mod user;

pub use booking::Entity as Booking;
pub use coworking::Entity as Coworking;
pub use equipment::Entity as Equipment;
pub use payment::Entity as Payment;
pub use room::Entity as Room;
pub use room_equipment::Entity as RoomEquipment;
pub use user::Entity as User;
