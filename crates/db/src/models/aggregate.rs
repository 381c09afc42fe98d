//! Row shapes returned by the aggregation queries.

use placement_core::pivot::MinuteCell;
use placement_core::report::{SupervisorHours, UnitProgress};
use placement_core::types::DbId;
use sqlx::FromRow;

/// Summed minutes for one `(domain, activity)` pair.
#[derive(Debug, Clone, FromRow)]
pub struct DomainActivityMinutes {
    pub domain_id: DbId,
    pub activity_id: DbId,
    pub minutes: i64,
}

impl From<DomainActivityMinutes> for MinuteCell {
    fn from(row: DomainActivityMinutes) -> Self {
        Self {
            domain_id: row.domain_id,
            activity_id: row.activity_id,
            minutes: row.minutes,
        }
    }
}

/// Summed minutes for one supervisor.
#[derive(Debug, Clone, FromRow)]
pub struct SupervisorMinutes {
    pub supervisor_id: DbId,
    pub supervisor: String,
    pub minutes: i64,
}

impl From<SupervisorMinutes> for SupervisorHours {
    fn from(row: SupervisorMinutes) -> Self {
        SupervisorHours::new(row.supervisor_id, row.supervisor, row.minutes)
    }
}

/// Summed minutes logged against one unit, alongside its requirement.
#[derive(Debug, Clone, FromRow)]
pub struct UnitMinutes {
    pub unit_id: DbId,
    pub unit: String,
    pub required_minutes: Option<i32>,
    pub minutes: i64,
}

impl From<UnitMinutes> for UnitProgress {
    fn from(row: UnitMinutes) -> Self {
        UnitProgress::new(row.unit_id, row.unit, row.required_minutes, row.minutes)
    }
}
