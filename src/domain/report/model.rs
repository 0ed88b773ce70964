//! Report rows

use rust_decimal::Decimal;
use serde::Serialize;

/// Share of a period a room spent booked (confirmed or completed bookings only)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOccupancy {
    pub room_id: i32,
    pub room_name: String,
    pub coworking_name: String,
    pub total_bookings: i64,
    pub booked_hours: f64,
    pub total_hours: f64,
    /// 0..=100, two decimals
    pub occupancy_percentage: f64,
}

/// Payment sums per coworking for bookings created in a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueReport {
    pub coworking_id: i32,
    pub coworking_name: String,
    pub address: String,
    pub total_bookings: i64,
    /// All payments regardless of status
    pub total_revenue: Decimal,
    /// Paid payments
    pub confirmed_revenue: Decimal,
    pub pending_revenue: Decimal,
    pub refunded_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatistics {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    /// Sum of booking totals, whatever their status
    pub total_spent: Decimal,
    /// Sum of payments in `paid` status
    pub total_paid: Decimal,
}
