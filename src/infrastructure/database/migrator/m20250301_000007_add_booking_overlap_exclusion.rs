//! Add the booking overlap exclusion constraint (PostgreSQL only)
//!
//! Rejects a second pending/confirmed booking whose `[starts_at, ends_at)`
//! range intersects another one on the same room, with SQLSTATE 23P01.
//! SQLite has no equivalent; the booking repository re-checks inside the
//! insert transaction there.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

const OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist")
            .await?;
        db.execute_unprepared(&format!(
            "ALTER TABLE bookings ADD CONSTRAINT {} EXCLUDE USING gist (\
                room_id WITH =, \
                tstzrange(starts_at, ends_at, '[)') WITH &&\
            ) WHERE (status IN ('pending', 'confirmed'))",
            OVERLAP_CONSTRAINT
        ))
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "ALTER TABLE bookings DROP CONSTRAINT IF EXISTS {}",
                OVERLAP_CONSTRAINT
            ))
            .await?;
        Ok(())
    }
}
