mod common;

use std::sync::Arc;

use chrono::Duration;
use common::{at, file_app, hub, hub_on, money, Hub};

use coworking_booking::domain::{BookingStatus, PaymentStatus};
use coworking_booking::{DomainError, ErrorKind};

#[tokio::test]
async fn booking_opens_pending_payment_for_full_amount() {
    let h = hub().await;

    let (booking, payment) = h
        .app
        .bookings
        .create_booking(
            h.room_a.id,
            h.member.id,
            at(10, 0),
            at(12, 30),
            Some("card".into()),
        )
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_amount, money(1250));
    assert_eq!(payment.booking_id, booking.id);
    assert_eq!(payment.amount, booking.total_amount);
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.payment_method.as_deref(), Some("card"));
    assert!(payment.paid_at.is_none());
}

#[tokio::test]
async fn overlapping_booking_is_rejected_and_adjacent_is_not() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(12, 0), None)
        .await
        .unwrap();

    let err = bookings
        .create_booking(h.room_a.id, h.member.id, at(11, 0), at(13, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BookingConflict { room_id, .. } if room_id == h.room_a.id));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Touching windows share no instant
    bookings
        .create_booking(h.room_a.id, h.member.id, at(12, 0), at(13, 0), None)
        .await
        .unwrap();
    // Another room is unaffected
    bookings
        .create_booking(h.room_b.id, h.member.id, at(10, 0), at(12, 0), None)
        .await
        .unwrap();

    // The rejected attempt left nothing behind
    let history = bookings.user_bookings(h.member.id).await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn queued_bookings_for_same_slot_admit_one() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (first, second) = tokio::join!(
        bookings.create_booking(h.room_a.id, h.member.id, at(9, 0), at(11, 0), None),
        bookings.create_booking(h.room_a.id, h.member.id, at(10, 0), at(12, 0), None),
    );

    let won = [first.is_ok(), second.is_ok()];
    assert_eq!(won.iter().filter(|ok| **ok).count(), 1);
    let lost = if first.is_err() { first } else { second };
    assert!(matches!(lost, Err(DomainError::BookingConflict { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_overlapping_bookings_admit_exactly_one() {
    const ROUNDS: i64 = 10;
    const CONTENDERS: i64 = 4;

    let dir = tempfile::tempdir().unwrap();
    let Hub {
        app,
        room_a,
        member,
        ..
    } = hub_on(file_app(dir.path(), 8).await).await;
    let app = Arc::new(app);
    let (room_id, user_id) = (room_a.id, member.id);

    for round in 0..ROUNDS {
        // Every window of a round overlaps every other; rounds never touch
        let base = at(0, 0) + Duration::hours(2 * round);
        let tasks: Vec<_> = (0..CONTENDERS)
            .map(|k| {
                let app = Arc::clone(&app);
                let starts_at = base + Duration::minutes(15 * k);
                let ends_at = starts_at + Duration::hours(1);
                tokio::spawn(async move {
                    app.bookings
                        .create_booking(room_id, user_id, starts_at, ends_at, None)
                        .await
                })
            })
            .collect();

        let mut won = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => won += 1,
                Err(DomainError::BookingConflict { room_id: rejected, .. }) => {
                    assert_eq!(rejected, room_id)
                }
                Err(other) => panic!("round {}: unexpected error {}", round, other),
            }
        }
        assert_eq!(won, 1, "round {} admitted {} bookings", round, won);
    }

    let history = app.bookings.user_bookings(user_id).await.unwrap();
    assert_eq!(history.len() as i64, ROUNDS);
}

#[tokio::test]
async fn cancelled_booking_frees_the_slot() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (booking, _) = bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(12, 0), None)
        .await
        .unwrap();
    bookings.cancel_booking(booking.id, h.member.id).await.unwrap();

    bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(12, 0), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_room_or_user_is_not_found() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let err = bookings
        .create_booking(9_999, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));

    let err = bookings
        .create_booking(h.room_a.id, 9_999, at(10, 0), at(11, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));

    // Neither attempt holds the slot
    bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_window_is_rejected_before_the_store() {
    let h = hub().await;
    let err = h
        .app
        .bookings
        .create_booking(h.room_a.id, h.member.id, at(12, 0), at(12, 0), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = h
        .app
        .bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), Some("x".repeat(51)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn payment_confirms_once() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (booking, payment) = bookings
        .create_booking(h.room_b.id, h.member.id, at(14, 0), at(15, 0), None)
        .await
        .unwrap();

    let (paid, confirmed) = bookings.confirm_payment(payment.id).await.unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);
    assert!(paid.paid_at.is_some());
    assert_eq!(confirmed.id, booking.id);
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let err = bookings.confirm_payment(payment.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PaymentNotFoundOrAlreadyPaid(id) if id == payment.id));

    let err = bookings.confirm_payment(9_999).await.unwrap_err();
    assert!(matches!(err, DomainError::PaymentNotFoundOrAlreadyPaid(9_999)));
}

#[tokio::test]
async fn cancelling_paid_booking_refunds_payment() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (booking, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(payment.id).await.unwrap();

    bookings.cancel_booking(booking.id, h.member.id).await.unwrap();

    let booking = bookings.find_booking(booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
    let payment = bookings.find_payment(payment.id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Refunded);

    // Cancelled is terminal
    let err = bookings
        .cancel_booking(booking.id, h.member.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BookingNotCancellable(_)));
}

#[tokio::test]
async fn cancelling_unpaid_booking_leaves_payment_pending() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (booking, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();
    bookings.cancel_booking(booking.id, h.member.id).await.unwrap();

    let payment = bookings.payment_for_booking(booking.id).await.unwrap().unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    // A payment of a cancelled booking cannot confirm it
    let err = bookings.confirm_payment(payment.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    let payment = bookings.find_payment(payment.id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
}

#[tokio::test]
async fn only_the_owner_can_cancel() {
    let h = hub().await;
    let other = common::user(&h.app, "other@example.com").await;
    let bookings = &h.app.bookings;

    let (booking, _) = bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();

    let err = bookings.cancel_booking(booking.id, other.id).await.unwrap_err();
    assert!(matches!(err, DomainError::BookingNotCancellable(id) if id == booking.id));
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let booking = bookings.find_booking(booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn finished_confirmed_bookings_complete() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (paid, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(8, 0), at(9, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(payment.id).await.unwrap();
    let (unpaid, _) = bookings
        .create_booking(h.room_a.id, h.member.id, at(9, 0), at(10, 0), None)
        .await
        .unwrap();
    let (later, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(18, 0), at(19, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(payment.id).await.unwrap();

    assert_eq!(bookings.complete_finished_bookings(at(12, 0)).await.unwrap(), 1);
    assert_eq!(bookings.complete_finished_bookings(at(12, 0)).await.unwrap(), 0);

    assert_eq!(
        bookings.find_booking(paid.id).await.unwrap().status,
        BookingStatus::Completed
    );
    assert_eq!(
        bookings.find_booking(unpaid.id).await.unwrap().status,
        BookingStatus::Pending
    );
    assert_eq!(
        bookings.find_booking(later.id).await.unwrap().status,
        BookingStatus::Confirmed
    );

    // A completed booking no longer blocks its window
    bookings
        .create_booking(h.room_a.id, h.member.id, at(8, 0), at(9, 0), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn history_lists_newest_first_with_payment_state() {
    let h = hub().await;
    let bookings = &h.app.bookings;

    let (first, payment) = bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();
    bookings.confirm_payment(payment.id).await.unwrap();
    let (second, _) = bookings
        .create_booking(h.room_b.id, h.member.id, at(10, 0), at(11, 0), None)
        .await
        .unwrap();

    let history = bookings.user_bookings(h.member.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].booking.id, second.id);
    assert_eq!(history[0].room_name, "B");
    assert_eq!(history[0].payment_status, "pending");
    assert!(history[0].paid_at.is_none());
    assert_eq!(history[1].booking.id, first.id);
    assert_eq!(history[1].coworking_name, h.coworking.name);
    assert_eq!(history[1].payment_status, "paid");
    assert!(history[1].paid_at.is_some());

    let err = bookings.user_bookings(9_999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
