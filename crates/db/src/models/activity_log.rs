//! Activity log (fact table) model and DTOs.

use placement_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `activity_logs` table: one logged activity instance.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub student_id: DbId,
    pub location_id: DbId,
    pub supervisor_id: DbId,
    pub activity_id: DbId,
    pub domain_id: DbId,
    pub unit_id: Option<DbId>,
    pub minutes_spent: i32,
    /// The service date, not the insertion date.
    pub record_date: Date,
    /// Id of the survey response this log was imported from.
    pub response_id: Option<String>,
    /// Set once the log has been changed after entry.
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new activity log.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityLog {
    pub student_id: DbId,
    pub location_id: DbId,
    pub supervisor_id: DbId,
    pub activity_id: DbId,
    pub domain_id: DbId,
    pub unit_id: Option<DbId>,
    pub minutes_spent: i32,
    pub record_date: Date,
    pub response_id: Option<String>,
}

/// DTO for editing an activity log. All fields are optional; any
/// successful update marks the log as edited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivityLog {
    pub student_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub activity_id: Option<DbId>,
    pub domain_id: Option<DbId>,
    /// Absent leaves the unit alone, `null` detaches it, an id sets it.
    #[serde(default, deserialize_with = "present")]
    pub unit_id: Option<Option<DbId>>,
    pub minutes_spent: Option<i32>,
    pub record_date: Option<Date>,
}

/// Wrap a present field, `null` included, in `Some`. With `#[serde(default)]`
/// an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
