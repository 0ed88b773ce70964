//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod coworking_repository;
pub mod equipment_repository;
pub mod report_repository;
pub mod repository_provider;
pub mod room_repository;
pub mod user_repository;

pub use booking_repository::OverlapGuard;
pub use repository_provider::SeaOrmRepositoryProvider;

use log::warn;
use sea_orm::DatabaseTransaction;

use crate::domain::DomainResult;

/// Commit on success; otherwise roll back and hand back the original error.
pub(crate) async fn settle<T>(txn: DatabaseTransaction, result: DomainResult<T>) -> DomainResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                warn!("Rollback failed after '{}': {}", e, rollback);
            }
            Err(e)
        }
    }
}
