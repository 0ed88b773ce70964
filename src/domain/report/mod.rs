//! Reporting
//!
//! Read-only roll-ups over bookings and payments. The repository loads one
//! consistent snapshot of rows; the arithmetic lives in [`aggregate`] so it
//! can be checked without a database.

pub mod aggregate;
pub mod model;
pub mod repository;

pub use model::{RevenueReport, RoomOccupancy, UserStatistics};
pub use repository::ReportRepository;
