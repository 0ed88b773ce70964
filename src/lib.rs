//! # Coworking Booking
//!
//! Booking manager for coworking spaces: rooms, equipment, availability
//! search, bookings paid through a single payment each, and reports.
//!
//! ## Architecture
//!
//! - **domain**: Entities, status lifecycles, report arithmetic and the
//!   repository traits
//! - **application**: Services that validate input and drive the repositories
//! - **infrastructure**: SeaORM entities, migrations and repositories
//!   (PostgreSQL, or SQLite for embedded use and tests)
//! - **app**: Wiring of pool, migrations and services
//!
//! Booking, confirmation and cancellation each run as one database
//! transaction. Overlapping bookings of a room are rejected by the store:
//! an exclusion constraint on PostgreSQL, an in-transaction re-check on SQLite.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use app::{init_tracing, App, AppOptions};
pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::database::repositories::{OverlapGuard, SeaOrmRepositoryProvider};
pub use infrastructure::{init_database, DatabaseConfig, PoolConfig};

pub use shared::{DomainError, ErrorKind, TimeWindow};
