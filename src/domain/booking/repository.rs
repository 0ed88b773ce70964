//! Booking repository interface
//!
//! The three paired operations are atomic: each runs in one store
//! transaction and is rolled back entirely before an error is returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Booking, BookingDetails, NewBooking, Payment};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a pending booking priced from the room's current rate together
    /// with its pending payment.
    ///
    /// Fails with `NotFound` for an unknown room or user and with
    /// `BookingConflict` when the store rejects an overlapping active booking.
    async fn create_with_payment(&self, booking: NewBooking) -> DomainResult<(Booking, Payment)>;

    /// pending -> paid for the payment, then pending -> confirmed for its booking.
    async fn confirm_payment(&self, payment_id: i32) -> DomainResult<(Payment, Booking)>;

    /// pending|confirmed -> cancelled for a booking owned by `user_id`,
    /// and paid -> refunded for its payment when there is one.
    async fn cancel_with_refund(&self, booking_id: i32, user_id: i32) -> DomainResult<()>;

    /// confirmed -> completed for every booking that ended at or before `now`.
    async fn complete_finished(&self, now: DateTime<Utc>) -> DomainResult<u64>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    async fn find_payment_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;

    async fn find_payment_for_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>>;

    /// Booking history of a user, newest first
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<BookingDetails>>;
}
