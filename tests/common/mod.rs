//! Shared fixtures: an in-memory SQLite store with a small catalog

#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use coworking_booking::domain::user::CreateUserDto;
use coworking_booking::domain::{Coworking, NewCoworking, NewEquipment, NewRoom, Room, User};
use coworking_booking::{init_database, App, DatabaseConfig, PoolConfig};

/// One connection: every `sqlite::memory:` connection is its own database.
pub async fn app() -> App {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool: PoolConfig {
            max_connections: 1,
            min_connections: 1,
            max_lifetime_secs: 3600,
            connect_timeout_secs: 30,
        },
    };
    let db = init_database(&config).await.expect("connect sqlite");
    App::from_connection(db, true)
        .await
        .expect("migrate")
        .with_password_cost(4)
}

/// File-backed SQLite store under `dir`, with a pool of `max_connections`
/// so transactions really run side by side.
pub async fn file_app(dir: &Path, max_connections: u32) -> App {
    let path = dir.join("bookings.db");
    let mut config = DatabaseConfig::sqlite(&path.to_string_lossy());
    config.pool = PoolConfig {
        max_connections,
        min_connections: 1,
        max_lifetime_secs: 3600,
        connect_timeout_secs: 30,
    };
    let db = init_database(&config).await.expect("connect sqlite file");
    App::from_connection(db, true)
        .await
        .expect("migrate")
        .with_password_cost(4)
}

/// 2030-01-15 at `h:m` UTC
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 15, h, m, 0).unwrap()
}

pub fn money(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

pub async fn coworking(app: &App, name: &str) -> Coworking {
    app.catalog
        .create_coworking(NewCoworking {
            name: name.to_string(),
            address: format!("{} street 1", name),
            description: None,
        })
        .await
        .expect("create coworking")
}

pub async fn room(app: &App, coworking_id: i32, name: &str, capacity: i32, rate: i64) -> Room {
    app.catalog
        .create_room(NewRoom {
            coworking_id,
            name: name.to_string(),
            capacity,
            area_sqm: Some(20.0),
            hourly_rate: money(rate),
        })
        .await
        .expect("create room")
}

pub async fn user(app: &App, email: &str) -> User {
    app.catalog
        .create_user(CreateUserDto {
            email: email.to_string(),
            password: "correct horse".to_string(),
            full_name: format!("User {}", email),
            role: None,
        })
        .await
        .expect("create user")
}

pub async fn equipment(app: &App, name: &str) -> i32 {
    app.catalog
        .upsert_equipment(NewEquipment {
            name: name.to_string(),
            description: None,
        })
        .await
        .expect("upsert equipment")
        .id
}

/// Hub with room A (4 seats, 500/h) and room B (10 seats, 1000/h, projector),
/// plus one member.
pub struct Hub {
    pub app: App,
    pub coworking: Coworking,
    pub room_a: Room,
    pub room_b: Room,
    pub projector: i32,
    pub member: User,
}

pub async fn hub() -> Hub {
    hub_on(app().await).await
}

pub async fn hub_on(app: App) -> Hub {
    let coworking = coworking(&app, "Hub").await;
    let room_a = room(&app, coworking.id, "A", 4, 500).await;
    let room_b = room(&app, coworking.id, "B", 10, 1000).await;
    let projector = equipment(&app, "projector").await;
    app.catalog
        .attach_equipment(room_b.id, projector)
        .await
        .expect("attach projector");
    let member = user(&app, "member@example.com").await;
    Hub {
        app,
        coworking,
        room_a,
        room_b,
        projector,
        member,
    }
}
