//! Activity category model and DTOs.

use placement_core::pivot::ActivityColumn;
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table. Activities are the pivot columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new activity category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub name: String,
}

impl From<&Activity> for ActivityColumn {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
        }
    }
}
