mod common;

use chrono::{Duration, Utc};
use common::{at, hub, money};

use coworking_booking::shared::report_period;
use coworking_booking::ErrorKind;

#[tokio::test]
async fn occupancy_counts_confirmed_and_completed_time() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (_, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(9, 0), at(11, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(payment.id).await.unwrap();
    // Pending time is not occupancy
    bookings
        .create_booking(h.room_b.id, h.member.id, at(9, 0), at(17, 0), None)
        .await
        .unwrap();

    let day = at(0, 0).date_naive();
    let period = report_period(day, day).unwrap();
    let rows = h.app.reports.room_occupancy(&period).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].room_id, h.room_a.id);
    assert_eq!(rows[0].total_bookings, 1);
    assert_eq!(rows[0].booked_hours, 2.0);
    assert_eq!(rows[0].total_hours, period.hours());
    // 2h of 23:59:59
    assert_eq!(rows[0].occupancy_percentage, 8.33);
    assert_eq!(rows[0].coworking_name, h.coworking.name);

    assert_eq!(rows[1].room_id, h.room_b.id);
    assert_eq!(rows[1].total_bookings, 0);
    assert_eq!(rows[1].occupancy_percentage, 0.0);

    // Completing keeps the hours
    bookings.complete_finished_bookings(at(12, 0)).await.unwrap();
    let rows = h.app.reports.room_occupancy(&period).await.unwrap();
    assert_eq!(rows[0].booked_hours, 2.0);
}

#[tokio::test]
async fn revenue_splits_by_payment_status() {
    let h = hub().await;
    let quiet = common::coworking(&h.app, "Quiet").await;
    let bookings = &h.app.bookings;

    // 2h in A: paid 1000
    let (_, paid) = bookings
        .create_booking(h.room_a.id, h.member.id, at(9, 0), at(11, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(paid.id).await.unwrap();
    // 1h in A: pending 500
    bookings
        .create_booking(h.room_a.id, h.member.id, at(12, 0), at(13, 0), None)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let period = report_period(today - Duration::days(1), today + Duration::days(1)).unwrap();
    let rows = h.app.reports.revenue(&period).await.unwrap();

    assert_eq!(rows.len(), 2);
    let hub_row = &rows[0];
    assert_eq!(hub_row.coworking_id, h.coworking.id);
    assert_eq!(hub_row.total_bookings, 2);
    assert_eq!(hub_row.total_revenue, money(1500));
    assert_eq!(hub_row.confirmed_revenue, money(1000));
    assert_eq!(hub_row.pending_revenue, money(500));
    assert_eq!(hub_row.refunded_amount, money(0));

    let quiet_row = &rows[1];
    assert_eq!(quiet_row.coworking_id, quiet.id);
    assert_eq!(quiet_row.total_bookings, 0);
    assert_eq!(quiet_row.total_revenue, money(0));

    // Refunds move money out of confirmed revenue but stay in the total
    bookings
        .cancel_booking(paid.booking_id, h.member.id)
        .await
        .unwrap();
    let rows = h.app.reports.revenue(&period).await.unwrap();
    assert_eq!(rows[0].total_revenue, money(1500));
    assert_eq!(rows[0].confirmed_revenue, money(0));
    assert_eq!(rows[0].refunded_amount, money(1000));

    // Bookings made outside the period are not counted
    let past = report_period(today - Duration::days(30), today - Duration::days(20)).unwrap();
    let rows = h.app.reports.revenue(&past).await.unwrap();
    assert!(rows.iter().all(|r| r.total_bookings == 0));
}

#[tokio::test]
async fn user_statistics_summarise_bookings_and_payments() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (_, paid) = bookings
        .create_booking(h.room_a.id, h.member.id, at(8, 0), at(10, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(paid.id).await.unwrap();
    let (cancelled, _) = bookings
        .create_booking(h.room_b.id, h.member.id, at(8, 0), at(9, 0), None)
        .await
        .unwrap();
    bookings
        .cancel_booking(cancelled.id, h.member.id)
        .await
        .unwrap();
    bookings
        .create_booking(h.room_a.id, h.member.id, at(14, 0), at(15, 0), None)
        .await
        .unwrap();

    let stats = h.app.reports.user_statistics(h.member.id).await.unwrap();
    assert_eq!(stats.user_id, h.member.id);
    assert_eq!(stats.email, h.member.email);
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.confirmed_bookings, 1);
    assert_eq!(stats.cancelled_bookings, 1);
    assert_eq!(stats.completed_bookings, 0);
    // 1000 + 1000 + 500
    assert_eq!(stats.total_spent, money(2500));
    assert_eq!(stats.total_paid, money(1000));

    let err = h.app.reports.user_statistics(9_999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn new_user_has_empty_statistics() {
    let h = hub().await;
    let stats = h.app.reports.user_statistics(h.member.id).await.unwrap();
    assert_eq!(stats.total_bookings, 0);
    assert_eq!(stats.total_spent, money(0));
    assert_eq!(stats.total_paid, money(0));
}
