//! Shared query parameter types for API handlers.

use placement_core::error::CoreError;
use placement_core::filters::LogFilter;
use placement_core::types::{Date, DbId};
use serde::Deserialize;

/// Optional `?year=` scope for reports.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub year: Option<i32>,
}

/// Query parameters for `GET /activity-logs`.
///
/// Every present parameter narrows the result; `from` and `to` must be
/// given together. `limit` and `offset` are clamped in the repository.
#[derive(Debug, Default, Deserialize)]
pub struct LogListParams {
    pub student_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub supervisor_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    pub year: Option<i32>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LogListParams {
    /// Translate the present parameters into AND-combined filters.
    pub fn filters(&self) -> Result<Vec<LogFilter>, CoreError> {
        let mut filters = Vec::new();
        if let Some(id) = self.student_id {
            filters.push(LogFilter::Student(id));
        }
        if let Some(id) = self.location_id {
            filters.push(LogFilter::Location(id));
        }
        if let Some(id) = self.supervisor_id {
            filters.push(LogFilter::Supervisor(id));
        }
        if let Some(id) = self.unit_id {
            filters.push(LogFilter::Unit(id));
        }
        if let Some(year) = self.year {
            filters.push(LogFilter::year(year)?);
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) => filters.push(LogFilter::date_range(from, to)?),
            (None, None) => {}
            _ => {
                return Err(CoreError::Validation(
                    "from and to must be given together".to_string(),
                ))
            }
        }
        Ok(filters)
    }
}
