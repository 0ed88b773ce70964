//! Coworking domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

/// A coworking space; owns rooms.
#[derive(Debug, Clone, Serialize)]
pub struct Coworking {
    pub id: i32,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewCoworking {
    #[validate(length(min = 1, max = 255, message = "coworking name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 500, message = "address is required"))]
    pub address: String,
    pub description: Option<String>,
}
