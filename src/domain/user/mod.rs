//! User aggregate
//!
//! Users are created by operators and referenced by bookings; the booking
//! engine never modifies them.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{NewUserRecord, User, UserRole};
pub use repository::UserRepository;
