//! Availability search

use std::sync::Arc;

use tracing::debug;

use crate::domain::{AvailableRoom, DomainResult, RepositoryProvider, RoomSearch};
use crate::shared::{ensure_non_negative, ensure_positive};

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Rooms free for the whole window that pass every supplied filter,
    /// cheapest first.
    pub async fn search(&self, search: RoomSearch) -> DomainResult<Vec<AvailableRoom>> {
        if let Some(min_capacity) = search.min_capacity {
            ensure_positive(min_capacity, "min_capacity")?;
        }
        if let Some(max_rate) = search.max_rate {
            ensure_non_negative(max_rate, "max_rate")?;
        }
        for id in &search.equipment_ids {
            ensure_positive(*id, "equipment_id")?;
        }

        let rooms = self.repos.rooms().search_available(&search).await?;
        debug!(
            starts_at = %search.window.starts_at(),
            ends_at = %search.window.ends_at(),
            found = rooms.len(),
            "Availability search"
        );
        Ok(rooms)
    }
}
