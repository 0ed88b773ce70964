//! Application services

mod availability;
mod booking;
mod catalog;
mod reporting;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use catalog::CatalogService;
pub use reporting::ReportingService;
