//! Unit model and DTOs.

use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `units` table: the course unit hours count towards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    pub id: DbId,
    pub name: String,
    /// Minutes a student must log to complete the unit, if known.
    pub required_minutes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnit {
    pub name: String,
    pub required_minutes: Option<i32>,
}
