//! Domain × activity pivot of logged time.
//!
//! The store returns one minute total per `(domain, activity)` pair that has
//! logs. [`build_pivot`] turns those sparse cells into a dense table with a
//! row for every domain and a column for every activity, so domains with no
//! logged time still show up as all-zero rows.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::DbId;

/// Minutes in one hour; logged time is stored in minutes and reported in hours.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Convert stored minutes to reported hours.
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / MINUTES_PER_HOUR
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A domain as seen by the pivot: one row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub id: DbId,
    pub name: String,
    pub is_core: bool,
}

/// An activity category as seen by the pivot: one column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityColumn {
    pub id: DbId,
    pub name: String,
}

/// Summed minutes for one `(domain, activity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteCell {
    pub domain_id: DbId,
    pub activity_id: DbId,
    pub minutes: i64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One domain's logged time, one cell per activity column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub domain_id: DbId,
    pub domain_name: String,
    pub is_core: bool,
    /// Minutes per activity, in column order.
    pub minutes: Vec<i64>,
    /// Hours per activity, in column order.
    pub hours: Vec<f64>,
    pub total_minutes: i64,
    pub total_hours: f64,
}

impl PivotRow {
    /// Build a row from per-column minutes. Hours and totals are derived.
    pub fn from_minutes(domain: &DomainInfo, minutes: Vec<i64>) -> Self {
        let total_minutes = minutes.iter().sum();
        let hours = minutes.iter().copied().map(minutes_to_hours).collect();
        Self {
            domain_id: domain.id,
            domain_name: domain.name.clone(),
            is_core: domain.is_core,
            minutes,
            hours,
            total_minutes,
            total_hours: minutes_to_hours(total_minutes),
        }
    }
}

/// The full domain × activity table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    /// Column headers, ordered by activity id.
    pub activities: Vec<ActivityColumn>,
    /// One row per domain, ordered by domain id.
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Rows whose domain core flag equals `is_core`.
    pub fn rows_with_core(&self, is_core: bool) -> impl Iterator<Item = &PivotRow> {
        self.rows.iter().filter(move |r| r.is_core == is_core)
    }

    /// Grand total across every cell, in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.rows.iter().map(|r| r.total_minutes).sum()
    }
}

/// Pivot sparse minute cells into a dense table.
///
/// Rows follow domain id order and columns follow activity id order,
/// whatever order the inputs arrive in. Cells referencing a domain or
/// activity that is not in the given lists are dropped, which keeps every
/// row's total equal to the sum of its visible cells.
pub fn build_pivot(
    domains: &[DomainInfo],
    activities: &[ActivityColumn],
    cells: &[MinuteCell],
) -> PivotTable {
    let mut activities = activities.to_vec();
    activities.sort_by_key(|a| a.id);

    let mut domains: Vec<&DomainInfo> = domains.iter().collect();
    domains.sort_by_key(|d| d.id);

    let column_of: HashMap<DbId, usize> = activities
        .iter()
        .enumerate()
        .map(|(idx, a)| (a.id, idx))
        .collect();

    let mut grid: HashMap<DbId, Vec<i64>> = domains
        .iter()
        .map(|d| (d.id, vec![0; activities.len()]))
        .collect();

    for cell in cells {
        let (Some(&col), Some(row)) =
            (column_of.get(&cell.activity_id), grid.get_mut(&cell.domain_id))
        else {
            continue;
        };
        row[col] += cell.minutes;
    }

    let rows = domains
        .into_iter()
        .map(|d| {
            let minutes = grid.remove(&d.id).unwrap_or_default();
            PivotRow::from_minutes(d, minutes)
        })
        .collect();

    PivotTable { activities, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(id: DbId, name: &str, is_core: bool) -> DomainInfo {
        DomainInfo {
            id,
            name: name.to_string(),
            is_core,
        }
    }

    fn activity(id: DbId, name: &str) -> ActivityColumn {
        ActivityColumn {
            id,
            name: name.to_string(),
        }
    }

    fn cell(domain_id: DbId, activity_id: DbId, minutes: i64) -> MinuteCell {
        MinuteCell {
            domain_id,
            activity_id,
            minutes,
        }
    }

    fn worked_example() -> PivotTable {
        build_pivot(
            &[domain(1, "Cardiovascular", true), domain(2, "Other", false)],
            &[activity(1, "Assessment"), activity(2, "Delivery")],
            &[cell(1, 1, 60), cell(1, 2, 30), cell(2, 1, 90)],
        )
    }

    #[test]
    fn worked_example_produces_expected_hours() {
        let table = worked_example();
        assert_eq!(table.rows.len(), 2);

        let d1 = &table.rows[0];
        assert_eq!(d1.domain_name, "Cardiovascular");
        assert_eq!(d1.hours, vec![1.0, 0.5]);
        assert_eq!(d1.total_hours, 1.5);

        let d2 = &table.rows[1];
        assert_eq!(d2.domain_name, "Other");
        assert_eq!(d2.hours, vec![1.5, 0.0]);
        assert_eq!(d2.total_hours, 1.5);
    }

    #[test]
    fn no_logs_yields_all_zero_rows() {
        let table = build_pivot(
            &[domain(1, "A", true), domain(2, "B", false), domain(3, "C", false)],
            &[activity(1, "X"), activity(2, "Y")],
            &[],
        );
        assert_eq!(table.rows.len(), 3);
        for row in &table.rows {
            assert_eq!(row.minutes, vec![0, 0]);
            assert_eq!(row.total_hours, 0.0);
        }
    }

    #[test]
    fn rows_and_columns_follow_id_order() {
        let table = build_pivot(
            &[domain(9, "Late", false), domain(2, "Early", true)],
            &[activity(5, "Second"), activity(1, "First")],
            &[cell(9, 5, 120)],
        );
        let domain_ids: Vec<DbId> = table.rows.iter().map(|r| r.domain_id).collect();
        assert_eq!(domain_ids, vec![2, 9]);
        let activity_ids: Vec<DbId> = table.activities.iter().map(|a| a.id).collect();
        assert_eq!(activity_ids, vec![1, 5]);
        assert_eq!(table.rows[1].minutes, vec![0, 120]);
    }

    #[test]
    fn every_row_has_one_cell_per_activity() {
        let table = worked_example();
        for row in &table.rows {
            assert_eq!(row.minutes.len(), table.activities.len());
            assert_eq!(row.hours.len(), table.activities.len());
        }
    }

    #[test]
    fn row_total_equals_sum_of_cells() {
        let table = build_pivot(
            &[domain(1, "A", true), domain(2, "B", false)],
            &[activity(1, "X"), activity(2, "Y"), activity(3, "Z")],
            &[cell(1, 1, 17), cell(1, 3, 43), cell(2, 2, 5), cell(2, 3, 1000)],
        );
        for row in &table.rows {
            assert_eq!(row.total_minutes, row.minutes.iter().sum::<i64>());
            let summed: f64 = row.hours.iter().sum();
            assert!((row.total_hours - summed).abs() < 1e-9);
        }
    }

    #[test]
    fn no_activities_leaves_only_totals() {
        let table = build_pivot(&[domain(1, "A", true)], &[], &[cell(1, 1, 60)]);
        assert!(table.activities.is_empty());
        assert!(table.rows[0].minutes.is_empty());
        assert_eq!(table.rows[0].total_minutes, 0);
    }

    #[test]
    fn duplicate_cells_accumulate() {
        let table = build_pivot(
            &[domain(1, "A", true)],
            &[activity(1, "X")],
            &[cell(1, 1, 30), cell(1, 1, 30)],
        );
        assert_eq!(table.rows[0].hours, vec![1.0]);
    }

    #[test]
    fn cells_for_unknown_domains_are_dropped() {
        let table = build_pivot(&[domain(1, "A", true)], &[activity(1, "X")], &[cell(42, 1, 60)]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.total_minutes(), 0);
    }

    #[test]
    fn rows_with_core_splits_table() {
        let table = worked_example();
        let core: Vec<&str> = table
            .rows_with_core(true)
            .map(|r| r.domain_name.as_str())
            .collect();
        let additional: Vec<&str> = table
            .rows_with_core(false)
            .map(|r| r.domain_name.as_str())
            .collect();
        assert_eq!(core, vec!["Cardiovascular"]);
        assert_eq!(additional, vec!["Other"]);
    }

    #[test]
    fn minutes_convert_to_fractional_hours() {
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(0), 0.0);
    }
}
