//! Report arithmetic over already-loaded rows

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::model::{RevenueReport, RoomOccupancy, UserStatistics};
use crate::domain::booking::{Booking, BookingStatus, Payment, PaymentStatus};
use crate::domain::coworking::Coworking;
use crate::domain::user::User;
use crate::shared::TimeWindow;

/// Room identity as printed in the occupancy report
#[derive(Debug, Clone)]
pub struct RoomLabel {
    pub room_id: i32,
    pub room_name: String,
    pub coworking_name: String,
}

/// A booking created in the revenue period, attributed to its coworking
#[derive(Debug, Clone)]
pub struct RevenueEntry {
    pub coworking_id: i32,
    pub booking_id: i32,
    pub payment: Option<(Decimal, PaymentStatus)>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn counts_toward_occupancy(booking: &Booking, period: &TimeWindow) -> bool {
    matches!(
        booking.status,
        BookingStatus::Confirmed | BookingStatus::Completed
    ) && booking.starts_at >= period.starts_at()
        && booking.ends_at <= period.ends_at()
}

/// One row per room; bookings outside the period or not confirmed/completed
/// are ignored. Sorted by occupancy descending, then room id.
pub fn occupancy(
    period: &TimeWindow,
    rooms: &[RoomLabel],
    bookings: &[Booking],
) -> Vec<RoomOccupancy> {
    let total_hours = period.hours();

    let mut per_room: HashMap<i32, (i64, f64)> = HashMap::new();
    for booking in bookings.iter().filter(|b| counts_toward_occupancy(b, period)) {
        let entry = per_room.entry(booking.room_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += booking.duration_hours();
    }

    let mut rows: Vec<RoomOccupancy> = rooms
        .iter()
        .map(|room| {
            let (total_bookings, booked_hours) =
                per_room.get(&room.room_id).copied().unwrap_or((0, 0.0));
            RoomOccupancy {
                room_id: room.room_id,
                room_name: room.room_name.clone(),
                coworking_name: room.coworking_name.clone(),
                total_bookings,
                booked_hours,
                total_hours,
                occupancy_percentage: round2(booked_hours / total_hours * 100.0),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.occupancy_percentage
            .total_cmp(&a.occupancy_percentage)
            .then(a.room_id.cmp(&b.room_id))
    });
    rows
}

/// One row per coworking, including those without bookings.
/// Sorted by total revenue descending, then coworking id.
pub fn revenue(coworkings: &[Coworking], entries: &[RevenueEntry]) -> Vec<RevenueReport> {
    let mut rows: Vec<RevenueReport> = coworkings
        .iter()
        .map(|c| RevenueReport {
            coworking_id: c.id,
            coworking_name: c.name.clone(),
            address: c.address.clone(),
            total_bookings: 0,
            total_revenue: Decimal::ZERO,
            confirmed_revenue: Decimal::ZERO,
            pending_revenue: Decimal::ZERO,
            refunded_amount: Decimal::ZERO,
        })
        .collect();

    let index: HashMap<i32, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.coworking_id, i))
        .collect();

    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        let Some(&i) = index.get(&entry.coworking_id) else {
            continue;
        };
        let row = &mut rows[i];
        if seen.insert(entry.booking_id) {
            row.total_bookings += 1;
        }
        if let Some((amount, status)) = entry.payment {
            row.total_revenue += amount;
            match status {
                PaymentStatus::Paid => row.confirmed_revenue += amount,
                PaymentStatus::Pending => row.pending_revenue += amount,
                PaymentStatus::Refunded => row.refunded_amount += amount,
            }
        }
    }

    rows.sort_by(|a, b| {
        b.total_revenue
            .cmp(&a.total_revenue)
            .then(a.coworking_id.cmp(&b.coworking_id))
    });
    rows
}

pub fn user_statistics(user: &User, bookings: &[(Booking, Option<Payment>)]) -> UserStatistics {
    let mut stats = UserStatistics {
        user_id: user.id,
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        total_bookings: bookings.len() as i64,
        pending_bookings: 0,
        confirmed_bookings: 0,
        completed_bookings: 0,
        cancelled_bookings: 0,
        total_spent: Decimal::ZERO,
        total_paid: Decimal::ZERO,
    };

    for (booking, payment) in bookings {
        match booking.status {
            BookingStatus::Pending => stats.pending_bookings += 1,
            BookingStatus::Confirmed => stats.confirmed_bookings += 1,
            BookingStatus::Completed => stats.completed_bookings += 1,
            BookingStatus::Cancelled => stats.cancelled_bookings += 1,
        }
        stats.total_spent += booking.total_amount;
        if let Some(p) = payment.as_ref().filter(|p| p.status == PaymentStatus::Paid) {
            stats.total_paid += p.amount;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use crate::domain::user::UserRole;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 25, h, 0, 0).unwrap()
    }

    fn booking(id: i32, room_id: i32, from: u32, to: u32, status: BookingStatus) -> Booking {
        Booking {
            id,
            room_id,
            user_id: 1,
            starts_at: at(from),
            ends_at: at(to),
            total_amount: Decimal::from(500 * (to - from)),
            status,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn label(room_id: i32) -> RoomLabel {
        RoomLabel {
            room_id,
            room_name: format!("Room {}", room_id),
            coworking_name: "Hub".into(),
        }
    }

    fn coworking(id: i32, name: &str) -> Coworking {
        Coworking {
            id,
            name: name.into(),
            address: "Main st. 1".into(),
            description: None,
            created_at: at(0),
        }
    }

    #[test]
    fn two_hours_in_ten_hour_window_is_twenty_percent() {
        let period = TimeWindow::new(at(8), at(18)).unwrap();
        let rows = occupancy(
            &period,
            &[label(1), label(2)],
            &[booking(1, 1, 10, 12, BookingStatus::Confirmed)],
        );

        assert_eq!(rows[0].room_id, 1);
        assert_eq!(rows[0].total_bookings, 1);
        assert_eq!(rows[0].booked_hours, 2.0);
        assert_eq!(rows[0].total_hours, 10.0);
        assert_eq!(rows[0].occupancy_percentage, 20.0);

        assert_eq!(rows[1].room_id, 2);
        assert_eq!(rows[1].occupancy_percentage, 0.0);
    }

    #[test]
    fn occupancy_ignores_unconfirmed_and_straddling_bookings() {
        let period = TimeWindow::new(at(8), at(18)).unwrap();
        let rows = occupancy(
            &period,
            &[label(1)],
            &[
                booking(1, 1, 9, 10, BookingStatus::Pending),
                booking(2, 1, 10, 11, BookingStatus::Cancelled),
                booking(3, 1, 7, 9, BookingStatus::Confirmed),
                booking(4, 1, 17, 19, BookingStatus::Completed),
                booking(5, 1, 12, 15, BookingStatus::Completed),
            ],
        );

        assert_eq!(rows[0].total_bookings, 1);
        assert_eq!(rows[0].occupancy_percentage, 30.0);
    }

    #[test]
    fn occupancy_rounds_to_two_decimals() {
        let period = TimeWindow::new(at(0), at(3)).unwrap();
        let rows = occupancy(
            &period,
            &[label(1)],
            &[booking(1, 1, 0, 1, BookingStatus::Confirmed)],
        );
        assert_eq!(rows[0].occupancy_percentage, 33.33);
    }

    #[test]
    fn revenue_splits_by_payment_status() {
        let entries = vec![
            RevenueEntry {
                coworking_id: 1,
                booking_id: 10,
                payment: Some((Decimal::from(1000), PaymentStatus::Paid)),
            },
            RevenueEntry {
                coworking_id: 1,
                booking_id: 11,
                payment: Some((Decimal::from(500), PaymentStatus::Pending)),
            },
        ];
        let rows = revenue(&[coworking(1, "Hub"), coworking(2, "Empty")], &entries);

        assert_eq!(rows.len(), 2);
        let hub = &rows[0];
        assert_eq!(hub.coworking_id, 1);
        assert_eq!(hub.total_bookings, 2);
        assert_eq!(hub.total_revenue, Decimal::from(1500));
        assert_eq!(hub.confirmed_revenue, Decimal::from(1000));
        assert_eq!(hub.pending_revenue, Decimal::from(500));
        assert_eq!(hub.refunded_amount, Decimal::ZERO);

        let empty = &rows[1];
        assert_eq!(empty.total_bookings, 0);
        assert_eq!(empty.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn refunds_count_toward_total_revenue() {
        let entries = vec![
            RevenueEntry {
                coworking_id: 1,
                booking_id: 10,
                payment: Some((Decimal::from(300), PaymentStatus::Refunded)),
            },
            RevenueEntry {
                coworking_id: 1,
                booking_id: 11,
                payment: None,
            },
        ];
        let rows = revenue(&[coworking(1, "Hub")], &entries);
        assert_eq!(rows[0].total_bookings, 2);
        assert_eq!(rows[0].total_revenue, Decimal::from(300));
        assert_eq!(rows[0].refunded_amount, Decimal::from(300));
    }

    #[test]
    fn user_statistics_counts_only_paid_as_paid() {
        let user = User {
            id: 1,
            email: "ann@example.com".into(),
            password_hash: String::new(),
            full_name: "Ann".into(),
            role: UserRole::Member,
            created_at: at(0),
        };
        let paid = Payment {
            id: 1,
            booking_id: 1,
            amount: Decimal::from(1000),
            status: PaymentStatus::Paid,
            payment_method: Some("card".into()),
            paid_at: Some(at(1)),
            created_at: at(0),
        };
        let refunded = Payment {
            id: 2,
            booking_id: 2,
            status: PaymentStatus::Refunded,
            ..paid.clone()
        };
        let rows = vec![
            (booking(1, 1, 10, 12, BookingStatus::Confirmed), Some(paid)),
            (booking(2, 1, 13, 14, BookingStatus::Cancelled), Some(refunded)),
            (booking(3, 1, 15, 16, BookingStatus::Pending), None),
        ];

        let stats = user_statistics(&user, &rows);
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.cancelled_bookings, 1);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.completed_bookings, 0);
        assert_eq!(stats.total_spent, Decimal::from(2000));
        assert_eq!(stats.total_paid, Decimal::from(1000));
    }
}
