//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingRepository;
use super::coworking::CoworkingRepository;
use super::report::ReportRepository;
use super::room::{EquipmentRepository, RoomRepository};
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(3).await?;
///     let history = repos.bookings().find_by_user(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn coworkings(&self) -> &dyn CoworkingRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn equipment(&self) -> &dyn EquipmentRepository;
    fn users(&self) -> &dyn UserRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn reports(&self) -> &dyn ReportRepository;
}
