//! Report shaping on top of the domain × activity pivot.
//!
//! Provides the synthesized totals row, chart series (a transpose of the
//! pivot restricted to core or additional domains), the combined
//! [`DomainBreakdown`] every report embeds, supervisor hour summaries and
//! per-unit progress against required minutes.

use serde::Serialize;

use crate::pivot::{minutes_to_hours, ActivityColumn, PivotRow, PivotTable};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Label of the synthesized totals row.
pub const TOTAL_ROW_LABEL: &str = "Total";

// ---------------------------------------------------------------------------
// Totals row
// ---------------------------------------------------------------------------

/// Column-wise sums across every data row of a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsRow {
    pub label: String,
    pub minutes: Vec<i64>,
    pub hours: Vec<f64>,
    pub total_minutes: i64,
    pub total_hours: f64,
}

/// Sum every column of `rows`, including the grand total column.
///
/// `column_count` fixes the width of the result so that an empty table still
/// yields one zero per activity column.
pub fn build_totals_row(rows: &[PivotRow], column_count: usize) -> TotalsRow {
    let mut minutes = vec![0i64; column_count];
    for row in rows {
        for (sum, value) in minutes.iter_mut().zip(&row.minutes) {
            *sum += value;
        }
    }
    let total_minutes = rows.iter().map(|r| r.total_minutes).sum();

    TotalsRow {
        label: TOTAL_ROW_LABEL.to_string(),
        hours: minutes.iter().copied().map(minutes_to_hours).collect(),
        minutes,
        total_minutes,
        total_hours: minutes_to_hours(total_minutes),
    }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Hours for one activity category across the charted domains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    /// One value per entry of [`Chart::domains`], in the same order.
    pub values: Vec<f64>,
}

/// Chart-ready transpose of a pivot subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Labels of the domains included, in pivot row order.
    pub domains: Vec<String>,
    /// One series per activity, in column order.
    pub series: Vec<ChartSeries>,
}

/// Transpose the rows of `table` accepted by `include` into per-activity
/// series.
pub fn build_chart<F>(table: &PivotTable, include: F) -> Chart
where
    F: Fn(&PivotRow) -> bool,
{
    let rows: Vec<&PivotRow> = table.rows.iter().filter(|r| include(r)).collect();
    chart_from_rows(&table.activities, &rows)
}

/// Chart over core domains only.
pub fn core_chart(table: &PivotTable) -> Chart {
    let rows: Vec<&PivotRow> = table.rows_with_core(true).collect();
    chart_from_rows(&table.activities, &rows)
}

/// Chart over non-core (additional) domains only.
pub fn additional_chart(table: &PivotTable) -> Chart {
    let rows: Vec<&PivotRow> = table.rows_with_core(false).collect();
    chart_from_rows(&table.activities, &rows)
}

fn chart_from_rows(activities: &[ActivityColumn], rows: &[&PivotRow]) -> Chart {
    let series = activities
        .iter()
        .enumerate()
        .map(|(col, activity)| ChartSeries {
            label: activity.name.clone(),
            values: rows
                .iter()
                .map(|r| r.hours.get(col).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    Chart {
        domains: rows.iter().map(|r| r.domain_name.clone()).collect(),
        series,
    }
}

// ---------------------------------------------------------------------------
// Report body
// ---------------------------------------------------------------------------

/// The pivot section shared by every report: column headers, domain rows,
/// the totals row and both chart views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainBreakdown {
    pub activities: Vec<ActivityColumn>,
    pub domains: Vec<PivotRow>,
    pub total_row: TotalsRow,
    pub core: Chart,
    pub additional: Chart,
}

impl DomainBreakdown {
    pub fn from_table(table: PivotTable) -> Self {
        let total_row = build_totals_row(&table.rows, table.activities.len());
        let core = core_chart(&table);
        let additional = additional_chart(&table);
        Self {
            activities: table.activities,
            domains: table.rows,
            total_row,
            core,
            additional,
        }
    }
}

// ---------------------------------------------------------------------------
// Supervisor hours
// ---------------------------------------------------------------------------

/// Time logged under one supervisor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupervisorHours {
    pub supervisor_id: DbId,
    pub supervisor: String,
    pub minutes: i64,
    pub hours: f64,
}

impl SupervisorHours {
    pub fn new(supervisor_id: DbId, supervisor: String, minutes: i64) -> Self {
        Self {
            supervisor_id,
            supervisor,
            minutes,
            hours: minutes_to_hours(minutes),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit progress
// ---------------------------------------------------------------------------

/// A student's logged time against one unit's requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitProgress {
    pub unit_id: DbId,
    pub unit: String,
    pub required_minutes: Option<i32>,
    pub required_hours: Option<f64>,
    pub logged_minutes: i64,
    pub logged_hours: f64,
    /// Share of the requirement met, capped at 100. `None` without a requirement.
    pub percent_complete: Option<f64>,
    pub is_complete: bool,
}

impl UnitProgress {
    pub fn new(
        unit_id: DbId,
        unit: String,
        required_minutes: Option<i32>,
        logged_minutes: i64,
    ) -> Self {
        let percent_complete = match required_minutes {
            Some(req) if req > 0 => {
                Some((logged_minutes as f64 / f64::from(req) * 100.0).min(100.0))
            }
            Some(_) => Some(100.0),
            None => None,
        };
        let is_complete = match required_minutes {
            Some(req) => logged_minutes >= i64::from(req),
            None => false,
        };

        Self {
            unit_id,
            unit,
            required_minutes,
            required_hours: required_minutes.map(|m| minutes_to_hours(i64::from(m))),
            logged_minutes,
            logged_hours: minutes_to_hours(logged_minutes),
            percent_complete,
            is_complete,
        }
    }
}
