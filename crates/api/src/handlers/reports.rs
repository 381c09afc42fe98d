//! Handlers for the `/reports` resource.
//!
//! Each report aggregates the logs selected by its scope into a
//! [`DomainBreakdown`]. Cohort reports cover one calendar year; location and
//! student reports cover all time unless `?year=` narrows them.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use placement_core::error::CoreError;
use placement_core::filters::{cohort_year, LogFilter};
use placement_core::report::{DomainBreakdown, SupervisorHours, UnitProgress};
use placement_core::types::{DbId, Timestamp};
use placement_db::models::location::Location;
use placement_db::models::student::Student;
use placement_db::repositories::{AggregationRepo, LocationRepo, StudentRepo};
use serde::Serialize;
use sqlx::{Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::query::ReportParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CohortReport {
    pub year: i32,
    pub date_generated: Timestamp,
    #[serde(flatten)]
    pub breakdown: DomainBreakdown,
}

#[derive(Debug, Serialize)]
pub struct LocationReport {
    pub location: Location,
    pub year: Option<i32>,
    pub date_generated: Timestamp,
    pub supervisor_hours: Vec<SupervisorHours>,
    #[serde(flatten)]
    pub breakdown: DomainBreakdown,
}

#[derive(Debug, Serialize)]
pub struct StudentReport {
    pub student: Student,
    pub year: Option<i32>,
    pub date_generated: Timestamp,
    pub unit_progress: Vec<UnitProgress>,
    #[serde(flatten)]
    pub breakdown: DomainBreakdown,
}

/// `scope` plus a year filter when one was requested.
fn scoped(scope: LogFilter, year: Option<i32>) -> Result<Vec<LogFilter>, CoreError> {
    let mut filters = vec![scope];
    if let Some(year) = year {
        filters.push(LogFilter::year(year)?);
    }
    Ok(filters)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/reports/cohort?year=
///
/// Defaults to the current calendar year.
pub async fn cohort(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<CohortReport>>> {
    let date_generated = Utc::now();
    let year = params
        .year
        .unwrap_or_else(|| cohort_year(date_generated.date_naive()));
    let filters = [LogFilter::year(year)?];

    let mut tx = AggregationRepo::begin_snapshot(&state.pool).await?;
    let table = AggregationRepo::domain_activity_pivot(&mut *tx, &filters).await?;
    tx.commit().await?;
    tracing::debug!(year, total_minutes = table.total_minutes(), "Cohort report built");

    Ok(Json(DataResponse {
        data: CohortReport {
            year,
            date_generated,
            breakdown: DomainBreakdown::from_table(table),
        },
    }))
}

/// GET /api/v1/reports/locations/{id}?year=
pub async fn location(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<LocationReport>>> {
    let mut tx = AggregationRepo::begin_snapshot(&state.pool).await?;
    let location = LocationRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    let filters = scoped(LogFilter::Location(id), params.year)?;

    let table = AggregationRepo::domain_activity_pivot(&mut *tx, &filters).await?;
    let supervisor_hours = AggregationRepo::supervisor_hours(&mut *tx, &filters).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: LocationReport {
            location,
            year: params.year,
            date_generated: Utc::now(),
            supervisor_hours,
            breakdown: DomainBreakdown::from_table(table),
        },
    }))
}

/// GET /api/v1/reports/students/{id}?year=
pub async fn student(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let mut tx = AggregationRepo::begin_snapshot(&state.pool).await?;
    let student = StudentRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    student_report(tx, student, params).await
}

/// GET /api/v1/reports/students/by-number/{number}?year=
pub async fn student_by_number(
    State(state): State<AppState>,
    Path(number): Path<i64>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let mut tx = AggregationRepo::begin_snapshot(&state.pool).await?;
    let student = StudentRepo::find_by_number(&mut *tx, number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: number,
        }))?;
    student_report(tx, student, params).await
}

/// Finish a student report inside the snapshot the student was read in.
async fn student_report(
    mut tx: Transaction<'static, Postgres>,
    student: Student,
    params: ReportParams,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let filters = scoped(LogFilter::Student(student.id), params.year)?;

    let table = AggregationRepo::domain_activity_pivot(&mut *tx, &filters).await?;
    let unit_progress = AggregationRepo::unit_progress(&mut *tx, &filters).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: StudentReport {
            student,
            year: params.year,
            date_generated: Utc::now(),
            unit_progress,
            breakdown: DomainBreakdown::from_table(table),
        },
    }))
}
