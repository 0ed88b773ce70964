//! Domain layer
//!
//! Plain data shapes per aggregate and the repository traits the
//! infrastructure layer implements.

pub mod booking;
pub mod coworking;
pub mod report;
pub mod repositories;
pub mod room;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingStatus, NewBooking, Payment, PaymentStatus};
pub use coworking::{Coworking, NewCoworking};
pub use report::{RevenueReport, RoomOccupancy, UserStatistics};
pub use repositories::{DomainResult, RepositoryProvider};
pub use room::{AvailableRoom, Equipment, NewEquipment, NewRoom, Room, RoomSearch};
pub use user::{User, UserRole};

pub use crate::shared::errors::DomainError;
