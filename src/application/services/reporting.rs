//! Reporting service

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainResult, RepositoryProvider, RevenueReport, RoomOccupancy, UserStatistics,
};
use crate::shared::TimeWindow;

pub struct ReportingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn room_occupancy(&self, period: &TimeWindow) -> DomainResult<Vec<RoomOccupancy>> {
        let rows = self.repos.reports().room_occupancy(period).await?;
        debug!(rooms = rows.len(), "Occupancy report built");
        Ok(rows)
    }

    pub async fn revenue(&self, period: &TimeWindow) -> DomainResult<Vec<RevenueReport>> {
        let rows = self.repos.reports().revenue(period).await?;
        debug!(coworkings = rows.len(), "Revenue report built");
        Ok(rows)
    }

    pub async fn user_statistics(&self, user_id: i32) -> DomainResult<UserStatistics> {
        self.repos.reports().user_statistics(user_id).await
    }
}
