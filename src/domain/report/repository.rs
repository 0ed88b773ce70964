//! Report repository interface

use async_trait::async_trait;

use super::model::{RevenueReport, RoomOccupancy, UserStatistics};
use crate::domain::DomainResult;
use crate::shared::TimeWindow;

/// Each report reads from a single read-only snapshot.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn room_occupancy(&self, period: &TimeWindow) -> DomainResult<Vec<RoomOccupancy>>;

    async fn revenue(&self, period: &TimeWindow) -> DomainResult<Vec<RevenueReport>>;

    /// Fails with `NotFound` for an unknown user
    async fn user_statistics(&self, user_id: i32) -> DomainResult<UserStatistics>;
}
