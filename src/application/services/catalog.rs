//! Catalog service: users, coworkings, rooms and equipment

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::user::{CreateUserDto, NewUserRecord};
use crate::domain::{
    Coworking, DomainError, DomainResult, Equipment, NewCoworking, NewEquipment, NewRoom,
    RepositoryProvider, Room, User,
};
use crate::infrastructure::crypto::hash_password;
use crate::shared::{ensure_non_negative, ensure_positive};

/// Service for the reference data bookings are made against
pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    password_cost: Option<u32>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            password_cost: None,
        }
    }

    /// Override the bcrypt cost (the default is bcrypt's own)
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = Some(cost);
        self
    }

    // ── Users ──────────────────────────────────────────────────

    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        dto.validate()?;

        let password_hash = hash_password(&dto.password, self.password_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .create(NewUserRecord {
                email: dto.email.trim().to_lowercase(),
                password_hash,
                full_name: dto.full_name,
                role: dto.role.unwrap_or_default(),
            })
            .await?;

        info!(user_id = user.id, email = %user.email, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.repos
            .users()
            .find_by_email(&email.trim().to_lowercase())
            .await
    }

    // ── Coworkings ─────────────────────────────────────────────

    pub async fn create_coworking(&self, coworking: NewCoworking) -> DomainResult<Coworking> {
        coworking.validate()?;
        let created = self.repos.coworkings().create(coworking).await?;
        info!(coworking_id = created.id, name = %created.name, "Coworking created");
        Ok(created)
    }

    pub async fn list_coworkings(&self) -> DomainResult<Vec<Coworking>> {
        self.repos.coworkings().find_all().await
    }

    // ── Rooms ──────────────────────────────────────────────────

    pub async fn create_room(&self, room: NewRoom) -> DomainResult<Room> {
        room.validate()?;
        ensure_non_negative(room.hourly_rate, "hourly_rate")?;

        let created = self.repos.rooms().create(room).await?;
        info!(
            room_id = created.id,
            coworking_id = created.coworking_id,
            capacity = created.capacity,
            hourly_rate = %created.hourly_rate,
            "Room created"
        );
        Ok(created)
    }

    /// Rooms of a coworking, by name
    pub async fn list_rooms(&self, coworking_id: i32) -> DomainResult<Vec<Room>> {
        if self
            .repos
            .coworkings()
            .find_by_id(coworking_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Coworking", coworking_id));
        }
        self.repos.rooms().find_by_coworking(coworking_id).await
    }

    // ── Equipment ──────────────────────────────────────────────

    pub async fn upsert_equipment(&self, equipment: NewEquipment) -> DomainResult<Equipment> {
        equipment.validate()?;
        let saved = self.repos.equipment().upsert(equipment).await?;
        info!(equipment_id = saved.id, name = %saved.name, "Equipment saved");
        Ok(saved)
    }

    pub async fn attach_equipment(&self, room_id: i32, equipment_id: i32) -> DomainResult<()> {
        ensure_positive(room_id, "room_id")?;
        ensure_positive(equipment_id, "equipment_id")?;

        if self.repos.rooms().find_by_id(room_id).await?.is_none() {
            return Err(DomainError::not_found("Room", room_id));
        }
        if self
            .repos
            .equipment()
            .find_by_id(equipment_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Equipment", equipment_id));
        }

        self.repos
            .equipment()
            .attach_to_room(room_id, equipment_id)
            .await?;
        info!(room_id, equipment_id, "Equipment attached to room");
        Ok(())
    }

    pub async fn list_equipment(&self) -> DomainResult<Vec<Equipment>> {
        self.repos.equipment().find_all().await
    }
}
