//! Room and equipment domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

use crate::shared::TimeWindow;

/// Bookable room inside a coworking
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: i32,
    pub coworking_id: i32,
    pub name: String,
    pub capacity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    /// Price per hour; a booking's total is fixed from this at creation time
    pub hourly_rate: Decimal,
    pub created_at: DateTime<Utc>,
    /// Owning coworking name, filled by listing queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coworking_name: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewRoom {
    pub coworking_id: i32,
    #[validate(length(min = 1, max = 255, message = "room name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i32,
    #[validate(range(min = 0.0, message = "area must not be negative"))]
    pub area_sqm: Option<f64>,
    pub hourly_rate: Decimal,
}

/// Equipment type (projector, whiteboard, ...); `name` is the natural key
#[derive(Debug, Clone, Serialize)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewEquipment {
    #[validate(length(min = 1, max = 100, message = "equipment name is required"))]
    pub name: String,
    pub description: Option<String>,
}

/// Availability search parameters.
///
/// Absent filters are skipped entirely; an empty `equipment_ids` list means
/// "no equipment requirement".
#[derive(Debug, Clone)]
pub struct RoomSearch {
    pub window: TimeWindow,
    pub min_capacity: Option<i32>,
    pub max_rate: Option<Decimal>,
    pub equipment_ids: Vec<i32>,
}

impl RoomSearch {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            min_capacity: None,
            max_rate: None,
            equipment_ids: Vec::new(),
        }
    }

    pub fn min_capacity(mut self, capacity: i32) -> Self {
        self.min_capacity = Some(capacity);
        self
    }

    pub fn max_rate(mut self, rate: Decimal) -> Self {
        self.max_rate = Some(rate);
        self
    }

    pub fn equipment(mut self, ids: impl IntoIterator<Item = i32>) -> Self {
        self.equipment_ids = ids.into_iter().collect();
        self
    }
}

/// A room that is free for the searched window, with display details
#[derive(Debug, Clone, Serialize)]
pub struct AvailableRoom {
    pub room: Room,
    pub coworking_name: String,
    pub coworking_address: String,
    /// Attached equipment names, alphabetical
    pub equipment: Vec<String>,
}
