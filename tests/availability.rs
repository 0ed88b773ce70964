mod common;

use common::{at, hub, money};

use coworking_booking::domain::RoomSearch;
use coworking_booking::shared::TimeWindow;

fn window(from: (u32, u32), to: (u32, u32)) -> TimeWindow {
    TimeWindow::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
}

#[tokio::test]
async fn filters_compose() {
    let h = hub().await;
    let search = &h.app.availability;
    let w = window((10, 0), (12, 0));

    let all = search.search(RoomSearch::new(w)).await.unwrap();
    let names: Vec<_> = all.iter().map(|r| r.room.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(all[1].equipment, ["projector"]);
    assert!(all[0].equipment.is_empty());
    assert_eq!(all[0].coworking_name, h.coworking.name);
    assert_eq!(all[0].coworking_address, h.coworking.address);

    let big = search
        .search(RoomSearch::new(w).min_capacity(6))
        .await
        .unwrap();
    assert_eq!(big.len(), 1);
    assert_eq!(big[0].room.id, h.room_b.id);

    let cheap = search
        .search(RoomSearch::new(w).max_rate(money(600)))
        .await
        .unwrap();
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].room.id, h.room_a.id);

    let equipped = search
        .search(RoomSearch::new(w).equipment([h.projector]))
        .await
        .unwrap();
    assert_eq!(equipped.len(), 1);
    assert_eq!(equipped[0].room.id, h.room_b.id);

    let none = search
        .search(
            RoomSearch::new(w)
                .equipment([h.projector])
                .max_rate(money(600)),
        )
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn every_required_equipment_must_be_present() {
    let h = hub().await;
    let whiteboard = common::equipment(&h.app, "whiteboard").await;
    let w = window((10, 0), (12, 0));

    let found = h
        .app
        .availability
        .search(RoomSearch::new(w).equipment([h.projector, whiteboard]))
        .await
        .unwrap();
    assert!(found.is_empty());

    h.app
        .catalog
        .attach_equipment(h.room_b.id, whiteboard)
        .await
        .unwrap();
    // Attaching twice is a no-op
    h.app
        .catalog
        .attach_equipment(h.room_b.id, whiteboard)
        .await
        .unwrap();

    let found = h
        .app
        .availability
        .search(RoomSearch::new(w).equipment([whiteboard, h.projector, h.projector]))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].equipment, ["projector", "whiteboard"]);
}

#[tokio::test]
async fn active_bookings_hide_rooms_for_overlapping_windows_only() {
    let h = hub().await;
    let (_, payment) = h
        .app
        .bookings
        .create_booking(h.room_a.id, h.member.id, at(10, 0), at(12, 0), None)
        .await
        .unwrap();
    h.app.bookings.confirm_payment(payment.id).await.unwrap();
    let (pending, _) = h
        .app
        .bookings
        .create_booking(h.room_b.id, h.member.id, at(11, 0), at(13, 0), None)
        .await
        .unwrap();

    let free = |w: TimeWindow| {
        let app = &h.app;
        async move {
            app.availability
                .search(RoomSearch::new(w))
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.room.id)
                .collect::<Vec<_>>()
        }
    };

    assert!(free(window((11, 0), (12, 0))).await.is_empty());
    assert_eq!(free(window((12, 0), (13, 0))).await, [h.room_a.id]);
    assert_eq!(free(window((13, 0), (14, 0))).await, [h.room_a.id, h.room_b.id]);

    h.app
        .bookings
        .cancel_booking(pending.id, h.member.id)
        .await
        .unwrap();
    assert_eq!(free(window((12, 0), (13, 0))).await, [h.room_a.id, h.room_b.id]);
}

#[tokio::test]
async fn rooms_listing_requires_known_coworking() {
    let h = hub().await;
    let rooms = h.app.catalog.list_rooms(h.coworking.id).await.unwrap();
    assert_eq!(rooms.len(), 2);

    let err = h.app.catalog.list_rooms(9_999).await.unwrap_err();
    assert_eq!(err.kind(), coworking_booking::ErrorKind::NotFound);

    let err = h
        .app
        .catalog
        .attach_equipment(h.room_a.id, 9_999)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), coworking_booking::ErrorKind::NotFound);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let h = hub().await;
    let err = h
        .app
        .catalog
        .create_user(coworking_booking::domain::user::CreateUserDto {
            email: "member@example.com".into(),
            password: "another secret".into(),
            full_name: "Twin".into(),
            role: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), coworking_booking::ErrorKind::Conflict);

    let found = h
        .app
        .catalog
        .find_user_by_email("Member@Example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, h.member.id);
    assert_ne!(found.password_hash, "correct horse");
}
