//! Booking and payment domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::shared::TimeWindow;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, waiting for payment
    Pending,
    /// Payment received
    Confirmed,
    /// Cancelled by the user; payment refunded if it was paid
    Cancelled,
    /// The booked time has passed
    Completed,
}

impl BookingStatus {
    /// Statuses that occupy the room
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Statuses a booking may be in right before moving to `self`.
    pub fn allowed_sources(&self) -> &'static [BookingStatus] {
        match self {
            Self::Pending => &[],
            Self::Confirmed => &[Self::Pending],
            Self::Cancelled => &Self::ACTIVE,
            Self::Completed => &[Self::Confirmed],
        }
    }

    pub fn can_become(&self, next: BookingStatus) -> bool {
        next.allowed_sources().contains(self)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }

    pub fn allowed_sources(&self) -> &'static [PaymentStatus] {
        match self {
            Self::Pending => &[],
            Self::Paid => &[Self::Pending],
            Self::Refunded => &[Self::Paid],
        }
    }

    pub fn can_become(&self, next: PaymentStatus) -> bool {
        next.allowed_sources().contains(self)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room booking
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: i32,
    pub room_id: i32,
    pub user_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// `hourly_rate * duration_hours` at creation time
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn duration_hours(&self) -> f64 {
        (self.ends_at - self.starts_at).num_seconds() as f64 / 3600.0
    }
}

/// Payment for a booking (one per booking)
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request to book a room and open its payment
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i32,
    pub user_id: i32,
    pub window: TimeWindow,
    pub payment_method: Option<String>,
}

/// Booking with the room/coworking it belongs to and its payment state,
/// as shown in a user's booking history
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    pub booking: Booking,
    pub room_name: String,
    pub coworking_name: String,
    pub coworking_address: String,
    /// Payment status, or "no_payment" when the booking has none
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

// ── Tests ──────────────────────────────────────────────────────
