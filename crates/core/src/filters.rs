//! Filters over the `activity_logs` fact table.
//!
//! A report is an aggregation over a filtered subset of logs. Filters are
//! AND-combined by the query layer; an empty slice selects every log.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// A single predicate over `activity_logs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFilter {
    /// `record_date` within the calendar year, both ends inclusive.
    Year(i32),
    /// `record_date` between `from` and `to`, both ends inclusive.
    DateRange { from: Date, to: Date },
    Location(DbId),
    Student(DbId),
    Supervisor(DbId),
    Unit(DbId),
}

impl LogFilter {
    /// Build a year filter, rejecting years chrono cannot represent.
    pub fn year(year: i32) -> Result<Self, CoreError> {
        year_bounds(year)?;
        Ok(Self::Year(year))
    }

    /// Build an inclusive date range filter. `from` must not be after `to`.
    pub fn date_range(from: Date, to: Date) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "Date range start {from} is after end {to}"
            )));
        }
        Ok(Self::DateRange { from, to })
    }

    /// The inclusive `record_date` bounds this filter imposes, if any.
    pub fn date_bounds(&self) -> Option<(Date, Date)> {
        match *self {
            Self::Year(year) => year_bounds(year).ok(),
            Self::DateRange { from, to } => Some((from, to)),
            _ => None,
        }
    }
}

/// First and last day of `year`.
pub fn year_bounds(year: i32) -> Result<(Date, Date), CoreError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(CoreError::Validation(format!("Year {year} is out of range"))),
    }
}

/// The calendar year containing `today`; the default cohort scope.
pub fn cohort_year(today: Date) -> i32 {
    today.year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_bounds_cover_whole_year() {
        let (start, end) = year_bounds(2023).unwrap();
        assert_eq!(start, date(2023, 1, 1));
        assert_eq!(end, date(2023, 12, 31));
    }

    #[test]
    fn year_filter_rejects_unrepresentable_year() {
        assert!(LogFilter::year(i32::MAX).is_err());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = LogFilter::date_range(date(2023, 5, 2), date(2023, 5, 1));
        assert!(err.is_err());
    }

    #[test]
    fn single_day_range_is_allowed() {
        let day = date(2023, 5, 2);
        let filter = LogFilter::date_range(day, day).unwrap();
        assert_eq!(filter.date_bounds(), Some((day, day)));
    }

    #[test]
    fn non_date_filters_have_no_bounds() {
        assert_eq!(LogFilter::Location(3).date_bounds(), None);
        assert_eq!(LogFilter::Student(3).date_bounds(), None);
    }

    #[test]
    fn cohort_year_uses_calendar_year() {
        assert_eq!(cohort_year(date(2024, 12, 31)), 2024);
    }
}
