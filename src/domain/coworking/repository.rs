//! Coworking repository interface

use async_trait::async_trait;

use super::model::{Coworking, NewCoworking};
use crate::domain::DomainResult;

#[async_trait]
pub trait CoworkingRepository: Send + Sync {
    async fn create(&self, coworking: NewCoworking) -> DomainResult<Coworking>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Coworking>>;

    /// All coworkings ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Coworking>>;
}
