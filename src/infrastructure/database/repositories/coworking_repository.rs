//! SeaORM implementation of CoworkingRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::coworking::{Coworking, CoworkingRepository, NewCoworking};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::coworking;

pub struct SeaOrmCoworkingRepository {
    db: DatabaseConnection,
}

impl SeaOrmCoworkingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: coworking::Model) -> Coworking {
    Coworking {
        id: m.id,
        name: m.name,
        address: m.address,
        description: m.description,
        created_at: m.created_at,
    }
}

// ── CoworkingRepository impl ────────────────────────────────────

#[async_trait]
impl CoworkingRepository for SeaOrmCoworkingRepository {
    async fn create(&self, c: NewCoworking) -> DomainResult<Coworking> {
        debug!("Creating coworking: {}", c.name);

        let model = coworking::ActiveModel {
            name: Set(c.name),
            address: Set(c.address),
            description: Set(c.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Coworking>> {
        let model = coworking::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Coworking>> {
        let models = coworking::Entity::find()
            .order_by_asc(coworking::Column::Name)
            .order_by_asc(coworking::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
