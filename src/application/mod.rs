//! Application layer
//!
//! Services validate operator input, call the repositories and log the
//! outcome. They hold no state besides the repository provider.

pub mod services;

// Re-export key types for convenience
pub use services::{AvailabilityService, BookingService, CatalogService, ReportingService};
