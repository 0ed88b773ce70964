//! Booking service: the write path for bookings and their payments

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    Booking, BookingDetails, DomainError, DomainResult, NewBooking, Payment, RepositoryProvider,
};
use crate::shared::{ensure_positive, TimeWindow};

/// Longest payment method label the store accepts
const MAX_PAYMENT_METHOD_LEN: usize = 50;

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Book `room_id` for `[starts_at, ends_at)` and open a pending payment
    /// for the full amount.
    pub async fn create_booking(
        &self,
        room_id: i32,
        user_id: i32,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        payment_method: Option<String>,
    ) -> DomainResult<(Booking, Payment)> {
        ensure_positive(room_id, "room_id")?;
        ensure_positive(user_id, "user_id")?;
        let window = TimeWindow::new(starts_at, ends_at)?;

        let payment_method = payment_method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        if let Some(method) = &payment_method {
            if method.chars().count() > MAX_PAYMENT_METHOD_LEN {
                return Err(DomainError::Validation(format!(
                    "payment_method: at most {} characters",
                    MAX_PAYMENT_METHOD_LEN
                )));
            }
        }

        let result = self
            .repos
            .bookings()
            .create_with_payment(NewBooking {
                room_id,
                user_id,
                window,
                payment_method,
            })
            .await;

        match &result {
            Ok((booking, payment)) => info!(
                booking_id = booking.id,
                payment_id = payment.id,
                room_id,
                user_id,
                total_amount = %booking.total_amount,
                "Booking created"
            ),
            Err(DomainError::BookingConflict { .. }) => warn!(
                room_id,
                starts_at = %window.starts_at(),
                ends_at = %window.ends_at(),
                "Booking rejected: room already booked"
            ),
            Err(_) => {}
        }
        result
    }

    /// Mark the payment paid and its booking confirmed.
    pub async fn confirm_payment(&self, payment_id: i32) -> DomainResult<(Payment, Booking)> {
        let (payment, booking) = self.repos.bookings().confirm_payment(payment_id).await?;
        info!(
            payment_id,
            booking_id = booking.id,
            amount = %payment.amount,
            "Payment confirmed"
        );
        Ok((payment, booking))
    }

    /// Cancel a pending or confirmed booking owned by `user_id`, refunding a
    /// paid payment.
    pub async fn cancel_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<()> {
        self.repos
            .bookings()
            .cancel_with_refund(booking_id, user_id)
            .await?;
        info!(booking_id, user_id, "Booking cancelled");
        Ok(())
    }

    pub async fn user_bookings(&self, user_id: i32) -> DomainResult<Vec<BookingDetails>> {
        if self.repos.users().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }
        self.repos.bookings().find_by_user(user_id).await
    }

    /// Move confirmed bookings that ended at or before `now` to completed.
    pub async fn complete_finished_bookings(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let completed = self.repos.bookings().complete_finished(now).await?;
        if completed > 0 {
            info!(completed, "Finished bookings completed");
        }
        Ok(completed)
    }

    pub async fn find_booking(&self, booking_id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    pub async fn find_payment(&self, payment_id: i32) -> DomainResult<Payment> {
        self.repos
            .bookings()
            .find_payment_by_id(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", payment_id))
    }

    pub async fn payment_for_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>> {
        self.repos
            .bookings()
            .find_payment_for_booking(booking_id)
            .await
    }
}
