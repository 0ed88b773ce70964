//! SeaORM implementation of ReportRepository
//!
//! Each report loads its rows inside one read-only transaction and hands
//! them to the pure aggregation in `domain::report::aggregate`.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    AccessMode, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};

use crate::domain::booking::BookingStatus;
use crate::domain::report::aggregate::{self, RevenueEntry, RoomLabel};
use crate::domain::report::{ReportRepository, RevenueReport, RoomOccupancy, UserStatistics};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, coworking, payment, room, user};
use crate::shared::TimeWindow;

use super::booking_repository::{booking_to_domain, payment_to_domain};
use super::coworking_repository::model_to_domain as coworking_to_domain;
use super::settle;
use super::user_repository::user_model_to_domain;

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Read-only transaction that sees one consistent snapshot
    async fn begin_snapshot(&self) -> Result<DatabaseTransaction, DbErr> {
        match self.db.get_database_backend() {
            // A SQLite read transaction already reads from a single snapshot
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::RepeatableRead),
                        Some(AccessMode::ReadOnly),
                    )
                    .await
            }
        }
    }

    async fn load_occupancy(
        &self,
        txn: &DatabaseTransaction,
        period: &TimeWindow,
    ) -> DomainResult<Vec<RoomOccupancy>> {
        let rooms: Vec<RoomLabel> = room::Entity::find()
            .find_also_related(coworking::Entity)
            .all(txn)
            .await?
            .into_iter()
            .map(|(r, c)| RoomLabel {
                room_id: r.id,
                room_name: r.name,
                coworking_name: c.map(|c| c.name).unwrap_or_default(),
            })
            .collect();

        let bookings = booking::Entity::find()
            .filter(booking::Column::Status.is_in([
                BookingStatus::Confirmed.as_str(),
                BookingStatus::Completed.as_str(),
            ]))
            .filter(booking::Column::StartsAt.gte(period.starts_at()))
            .filter(booking::Column::EndsAt.lte(period.ends_at()))
            .all(txn)
            .await?
            .into_iter()
            .map(booking_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(aggregate::occupancy(period, &rooms, &bookings))
    }

    async fn load_revenue(
        &self,
        txn: &DatabaseTransaction,
        period: &TimeWindow,
    ) -> DomainResult<Vec<RevenueReport>> {
        let coworkings: Vec<_> = coworking::Entity::find()
            .all(txn)
            .await?
            .into_iter()
            .map(coworking_to_domain)
            .collect();

        let owner: HashMap<i32, i32> = room::Entity::find()
            .all(txn)
            .await?
            .into_iter()
            .map(|r| (r.id, r.coworking_id))
            .collect();

        let rows = booking::Entity::find()
            .filter(booking::Column::CreatedAt.gte(period.starts_at()))
            .filter(booking::Column::CreatedAt.lte(period.ends_at()))
            .find_also_related(payment::Entity)
            .all(txn)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for (b, p) in rows {
            let coworking_id = *owner.get(&b.room_id).ok_or_else(|| {
                DomainError::Integrity(format!("booking {} references missing room", b.id))
            })?;
            let payment = p.map(payment_to_domain).transpose()?;
            entries.push(RevenueEntry {
                coworking_id,
                booking_id: b.id,
                payment: payment.map(|p| (p.amount, p.status)),
            });
        }

        Ok(aggregate::revenue(&coworkings, &entries))
    }

    async fn load_user_statistics(
        &self,
        txn: &DatabaseTransaction,
        user_id: i32,
    ) -> DomainResult<UserStatistics> {
        let owner = user::Entity::find_by_id(user_id)
            .one(txn)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        let owner = user_model_to_domain(owner)?;

        let rows = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .find_also_related(payment::Entity)
            .all(txn)
            .await?
            .into_iter()
            .map(|(b, p)| Ok((booking_to_domain(b)?, p.map(payment_to_domain).transpose()?)))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(aggregate::user_statistics(&owner, &rows))
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn room_occupancy(&self, period: &TimeWindow) -> DomainResult<Vec<RoomOccupancy>> {
        debug!(
            "Occupancy report {} - {}",
            period.starts_at(),
            period.ends_at()
        );
        let txn = self.begin_snapshot().await?;
        let result = self.load_occupancy(&txn, period).await;
        settle(txn, result).await
    }

    async fn revenue(&self, period: &TimeWindow) -> DomainResult<Vec<RevenueReport>> {
        debug!("Revenue report {} - {}", period.starts_at(), period.ends_at());
        let txn = self.begin_snapshot().await?;
        let result = self.load_revenue(&txn, period).await;
        settle(txn, result).await
    }

    async fn user_statistics(&self, user_id: i32) -> DomainResult<UserStatistics> {
        debug!("User statistics for {}", user_id);
        let txn = self.begin_snapshot().await?;
        let result = self.load_user_statistics(&txn, user_id).await;
        settle(txn, result).await
    }
}
