//! Placement supervisor model and DTOs.

use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `supervisors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supervisor {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new supervisor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupervisor {
    pub name: String,
}
