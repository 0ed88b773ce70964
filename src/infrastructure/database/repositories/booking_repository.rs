//! SeaORM implementation of BookingRepository
//!
//! Every paired write runs in one transaction that is either committed as a
//! whole or rolled back before the error is returned. Confirm and cancel are
//! guarded by status-conditioned updates; a concurrent writer that already
//! moved the row makes the update match zero rows.
//!
//! Overlapping bookings are rejected by the store itself:
//! - PostgreSQL: the `bookings_no_overlap` exclusion constraint (SQLSTATE 23P01)
//! - SQLite: the booking is inserted first, then overlaps are counted inside
//!   the same write transaction. SQLite admits one writer at a time, so a
//!   competing insert either sees this row or is blocked until it commits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::{Alias, Expr, Func, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, FromQueryResult, IsolationLevel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::domain::booking::{
    Booking, BookingDetails, BookingRepository, BookingStatus, NewBooking, Payment, PaymentStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, coworking, payment, room};
use crate::shared::sql_state;

use super::settle;

/// SQLSTATE for `exclusion_violation`
const EXCLUSION_VIOLATION: &str = "23P01";

/// How the store keeps active bookings of a room from overlapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapGuard {
    /// A range exclusion constraint rejects the insert
    ExclusionConstraint,
    /// The insert is followed by an overlap count in the same serializable
    /// transaction
    SerializableRecheck,
}

impl OverlapGuard {
    pub fn for_backend(backend: DbBackend) -> Self {
        match backend {
            DbBackend::Postgres => Self::ExclusionConstraint,
            _ => Self::SerializableRecheck,
        }
    }
}

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
    guard: OverlapGuard,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        let guard = OverlapGuard::for_backend(db.get_database_backend());
        Self { db, guard }
    }

    pub fn guard(&self) -> OverlapGuard {
        self.guard
    }

    async fn begin_insert(&self) -> Result<DatabaseTransaction, DbErr> {
        match (self.guard, self.db.get_database_backend()) {
            (OverlapGuard::ExclusionConstraint, _) => self.db.begin().await,
            // SQLite transactions are always serializable
            (OverlapGuard::SerializableRecheck, DbBackend::Sqlite) => self.db.begin().await,
            (OverlapGuard::SerializableRecheck, _) => {
                self.db
                    .begin_with_config(Some(IsolationLevel::Serializable), None)
                    .await
            }
        }
    }

    async fn insert_booking_and_payment(
        &self,
        txn: &DatabaseTransaction,
        nb: NewBooking,
    ) -> DomainResult<(Booking, Payment)> {
        let now = Utc::now();
        let window = nb.window;
        let conflict = || DomainError::BookingConflict {
            room_id: nb.room_id,
            starts_at: window.starts_at(),
            ends_at: window.ends_at(),
        };

        // Price comes from the room row in the same statement, so a missing
        // room inserts nothing.
        let priced = Query::select()
            .column(room::Column::Id)
            .expr(Expr::value(nb.user_id))
            .expr(Expr::value(window.starts_at()))
            .expr(Expr::value(window.ends_at()))
            .expr(
                Func::cust(Alias::new("ROUND"))
                    .arg(Expr::col(room::Column::HourlyRate).mul(window.hours_decimal()))
                    .arg(2),
            )
            .expr(Expr::value(BookingStatus::Pending.as_str()))
            .expr(Expr::value(now))
            .expr(Expr::value(now))
            .from(room::Entity)
            .and_where(room::Column::Id.eq(nb.room_id))
            .to_owned();

        let insert = Query::insert()
            .into_table(booking::Entity)
            .columns([
                booking::Column::RoomId,
                booking::Column::UserId,
                booking::Column::StartsAt,
                booking::Column::EndsAt,
                booking::Column::TotalAmount,
                booking::Column::Status,
                booking::Column::CreatedAt,
                booking::Column::UpdatedAt,
            ])
            .select_from(priced)
            .map_err(|e| DomainError::Integrity(e.to_string()))?
            .returning_all()
            .to_owned();

        let row = match txn.query_one(txn.get_database_backend().build(&insert)).await {
            Ok(row) => row,
            Err(e) if sql_state(&e).as_deref() == Some(EXCLUSION_VIOLATION) => {
                return Err(conflict());
            }
            Err(e) => {
                return Err(match e.sql_err() {
                    Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                        DomainError::not_found("User", nb.user_id)
                    }
                    _ => e.into(),
                });
            }
        };
        let row = row.ok_or_else(|| DomainError::not_found("Room", nb.room_id))?;
        let created = booking::Model::from_query_result(&row, "")?;

        if self.guard == OverlapGuard::SerializableRecheck {
            let overlapping = booking::Entity::find()
                .filter(booking::Column::RoomId.eq(nb.room_id))
                .filter(booking::Column::Id.ne(created.id))
                .filter(booking::Column::Status.is_in(booking_statuses(&BookingStatus::ACTIVE)))
                .filter(booking::Column::StartsAt.lt(window.ends_at()))
                .filter(booking::Column::EndsAt.gt(window.starts_at()))
                .count(txn)
                .await?;
            if overlapping > 0 {
                return Err(conflict());
            }
        }

        let opened = payment::ActiveModel {
            booking_id: Set(created.id),
            amount: Set(created.total_amount.round_dp(2)),
            status: Set(PaymentStatus::Pending.as_str().to_string()),
            payment_method: Set(nb.payment_method),
            paid_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        Ok((booking_to_domain(created)?, payment_to_domain(opened)?))
    }

    async fn pay_and_confirm(
        &self,
        txn: &DatabaseTransaction,
        payment_id: i32,
    ) -> DomainResult<(Payment, Booking)> {
        let now = Utc::now();

        let paid = payment::Entity::update_many()
            .col_expr(payment::Column::Status, Expr::value(PaymentStatus::Paid.as_str()))
            .col_expr(payment::Column::PaidAt, Expr::value(now))
            .filter(payment::Column::Id.eq(payment_id))
            .filter(
                payment::Column::Status
                    .is_in(payment_statuses(PaymentStatus::Paid.allowed_sources())),
            )
            .exec(txn)
            .await?;
        if paid.rows_affected == 0 {
            return Err(DomainError::PaymentNotFoundOrAlreadyPaid(payment_id));
        }

        let paid = payment::Entity::find_by_id(payment_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                DomainError::Integrity(format!("payment {} vanished after update", payment_id))
            })?;

        let confirmed = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Confirmed.as_str()),
            )
            .col_expr(booking::Column::UpdatedAt, Expr::value(now))
            .filter(booking::Column::Id.eq(paid.booking_id))
            .filter(
                booking::Column::Status
                    .is_in(booking_statuses(BookingStatus::Confirmed.allowed_sources())),
            )
            .exec(txn)
            .await?;
        if confirmed.rows_affected == 0 {
            return Err(DomainError::Integrity(format!(
                "booking {} of payment {} is not pending",
                paid.booking_id, payment_id
            )));
        }

        let confirmed = booking::Entity::find_by_id(paid.booking_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                DomainError::Integrity(format!("booking {} vanished after update", paid.booking_id))
            })?;

        Ok((payment_to_domain(paid)?, booking_to_domain(confirmed)?))
    }

    async fn cancel_and_refund(
        &self,
        txn: &DatabaseTransaction,
        booking_id: i32,
        user_id: i32,
    ) -> DomainResult<()> {
        let now = Utc::now();

        let cancelled = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Cancelled.as_str()),
            )
            .col_expr(booking::Column::UpdatedAt, Expr::value(now))
            .filter(booking::Column::Id.eq(booking_id))
            .filter(booking::Column::UserId.eq(user_id))
            .filter(
                booking::Column::Status
                    .is_in(booking_statuses(BookingStatus::Cancelled.allowed_sources())),
            )
            .exec(txn)
            .await?;
        if cancelled.rows_affected == 0 {
            return Err(DomainError::BookingNotCancellable(booking_id));
        }

        // A pending payment stays pending; only money actually taken is refunded.
        let refunded = payment::Entity::update_many()
            .col_expr(
                payment::Column::Status,
                Expr::value(PaymentStatus::Refunded.as_str()),
            )
            .filter(payment::Column::BookingId.eq(booking_id))
            .filter(
                payment::Column::Status
                    .is_in(payment_statuses(PaymentStatus::Refunded.allowed_sources())),
            )
            .exec(txn)
            .await?;
        debug!(
            "Booking {} cancelled, {} payment(s) refunded",
            booking_id, refunded.rows_affected
        );
        Ok(())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn booking_statuses(statuses: &[BookingStatus]) -> Vec<&'static str> {
    statuses.iter().map(|s| s.as_str()).collect()
}

fn payment_statuses(statuses: &[PaymentStatus]) -> Vec<&'static str> {
    statuses.iter().map(|s| s.as_str()).collect()
}

pub(crate) fn booking_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Integrity(format!("booking {} has unknown status '{}'", m.id, m.status))
    })?;
    Ok(Booking {
        id: m.id,
        room_id: m.room_id,
        user_id: m.user_id,
        starts_at: m.starts_at,
        ends_at: m.ends_at,
        total_amount: m.total_amount.round_dp(2),
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

pub(crate) fn payment_to_domain(m: payment::Model) -> DomainResult<Payment> {
    let status = PaymentStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Integrity(format!("payment {} has unknown status '{}'", m.id, m.status))
    })?;
    Ok(Payment {
        id: m.id,
        booking_id: m.booking_id,
        amount: m.amount.round_dp(2),
        status,
        payment_method: m.payment_method,
        paid_at: m.paid_at,
        created_at: m.created_at,
    })
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create_with_payment(&self, nb: NewBooking) -> DomainResult<(Booking, Payment)> {
        debug!(
            "Creating booking: room {} user {} {} - {}",
            nb.room_id,
            nb.user_id,
            nb.window.starts_at(),
            nb.window.ends_at()
        );

        let txn = self.begin_insert().await?;
        let result = self.insert_booking_and_payment(&txn, nb).await;
        settle(txn, result).await
    }

    async fn confirm_payment(&self, payment_id: i32) -> DomainResult<(Payment, Booking)> {
        debug!("Confirming payment {}", payment_id);

        let txn = self.db.begin().await?;
        let result = self.pay_and_confirm(&txn, payment_id).await;
        settle(txn, result).await
    }

    async fn cancel_with_refund(&self, booking_id: i32, user_id: i32) -> DomainResult<()> {
        debug!("Cancelling booking {} for user {}", booking_id, user_id);

        let txn = self.db.begin().await?;
        let result = self.cancel_and_refund(&txn, booking_id, user_id).await;
        settle(txn, result).await
    }

    async fn complete_finished(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let completed = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Completed.as_str()),
            )
            .col_expr(booking::Column::UpdatedAt, Expr::value(now))
            .filter(
                booking::Column::Status
                    .is_in(booking_statuses(BookingStatus::Completed.allowed_sources())),
            )
            .filter(booking::Column::EndsAt.lte(now))
            .exec(&self.db)
            .await?;
        Ok(completed.rows_affected)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(booking_to_domain)
            .transpose()
    }

    async fn find_payment_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        payment::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(payment_to_domain)
            .transpose()
    }

    async fn find_payment_for_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>> {
        payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await?
            .map(payment_to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<BookingDetails>> {
        let rows = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .find_also_related(payment::Entity)
            .all(&self.db)
            .await?;

        let mut room_ids: Vec<i32> = rows.iter().map(|(b, _)| b.room_id).collect();
        room_ids.sort_unstable();
        room_ids.dedup();

        let rooms: HashMap<i32, (room::Model, Option<coworking::Model>)> = room::Entity::find()
            .filter(room::Column::Id.is_in(room_ids))
            .find_also_related(coworking::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(r, c)| (r.id, (r, c)))
            .collect();

        let mut history = Vec::with_capacity(rows.len());
        for (b, p) in rows {
            let (r, c) = rooms.get(&b.room_id).ok_or_else(|| {
                DomainError::Integrity(format!("booking {} references missing room", b.id))
            })?;
            let c = c.as_ref().ok_or_else(|| {
                DomainError::Integrity(format!("room {} has no coworking", r.id))
            })?;
            let payment = p.map(payment_to_domain).transpose()?;

            history.push(BookingDetails {
                booking: booking_to_domain(b)?,
                room_name: r.name.clone(),
                coworking_name: c.name.clone(),
                coworking_address: c.address.clone(),
                payment_status: payment
                    .as_ref()
                    .map(|p| p.status.as_str())
                    .unwrap_or("no_payment")
                    .to_string(),
                paid_at: payment.and_then(|p| p.paid_at),
            });
        }
        Ok(history)
    }
}
