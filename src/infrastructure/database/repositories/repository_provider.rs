//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::coworking::CoworkingRepository;
use crate::domain::report::ReportRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::{EquipmentRepository, RoomRepository};
use crate::domain::user::UserRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::coworking_repository::SeaOrmCoworkingRepository;
use super::equipment_repository::SeaOrmEquipmentRepository;
use super::report_repository::SeaOrmReportRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::user_repository::SeaOrmUserRepository;
use super::OverlapGuard;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id(3).await?;
/// let (booking, payment) = repos.bookings().create_with_payment(request).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    coworkings: SeaOrmCoworkingRepository,
    rooms: SeaOrmRoomRepository,
    equipment: SeaOrmEquipmentRepository,
    users: SeaOrmUserRepository,
    bookings: SeaOrmBookingRepository,
    reports: SeaOrmReportRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            coworkings: SeaOrmCoworkingRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            equipment: SeaOrmEquipmentRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            reports: SeaOrmReportRepository::new(db),
        }
    }

    /// Overlap protection in effect for the connected backend
    pub fn overlap_guard(&self) -> OverlapGuard {
        self.bookings.guard()
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn coworkings(&self) -> &dyn CoworkingRepository {
        &self.coworkings
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn equipment(&self) -> &dyn EquipmentRepository {
        &self.equipment
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn reports(&self) -> &dyn ReportRepository {
        &self.reports
    }
}
