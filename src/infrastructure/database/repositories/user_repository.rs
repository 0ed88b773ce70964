//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::domain::user::{NewUserRecord, User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    let role = UserRole::parse(&model.role).ok_or_else(|| {
        DomainError::Integrity(format!("user {} has unknown role '{}'", model.id, model.role))
    })?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        role,
        created_at: model.created_at,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, u: NewUserRecord) -> DomainResult<User> {
        debug!("Creating user: {}", u.email);

        let email = u.email.clone();
        let model = user::ActiveModel {
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            full_name: Set(u.full_name),
            role: Set(u.role.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(saved) => user_model_to_domain(saved),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(DomainError::Conflict(format!(
                    "user with email {}",
                    email
                ))),
                _ => Err(e.into()),
            },
        }
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }
}
