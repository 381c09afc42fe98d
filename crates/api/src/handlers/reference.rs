//! Handlers for the six reference resources.
//!
//! Listing and lookup by id are generic over [`ReferenceTable`]; creation is
//! per entity because each validates different fields.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use placement_core::error::CoreError;
use placement_core::types::DbId;
use placement_core::validation::{validate_name, validate_required_minutes, validate_student_number};
use placement_db::models::activity::{Activity, CreateActivity};
use placement_db::models::domain::{CreateDomain, Domain};
use placement_db::models::location::{CreateLocation, Location};
use placement_db::models::student::{CreateStudent, Student};
use placement_db::models::supervisor::{CreateSupervisor, Supervisor};
use placement_db::models::unit::{CreateUnit, Unit};
use placement_db::repositories::reference::{self, ReferenceTable};
use placement_db::repositories::{
    ActivityRepo, DomainRepo, LocationRepo, StudentRepo, SupervisorRepo, UnitRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

type Created<T> = (StatusCode, Json<DataResponse<T>>);

fn created<T: Serialize>(row: T) -> AppResult<Created<T>> {
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// Reject a name that already exists on `T`.
///
/// The importer resolves these entities by exact name, so a second row with
/// the same name would make every later import of it ambiguous.
async fn ensure_name_free<T: ReferenceTable>(state: &AppState, name: &str) -> AppResult<()> {
    if reference::find_by_name::<T, _>(&state.pool, name)
        .await?
        .is_empty()
    {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!("{} named {name:?} already exists", T::ENTITY)).into())
    }
}

// ---------------------------------------------------------------------------
// Generic
// ---------------------------------------------------------------------------

/// GET /api/v1/{resource}
pub async fn list<T>(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<T::Row>>>>
where
    T: ReferenceTable,
    T::Row: Serialize,
{
    let rows = reference::list_all::<T, _>(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{resource}/{id}
pub async fn get_by_id<T>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<T::Row>>>
where
    T: ReferenceTable,
    T::Row: Serialize,
{
    let row = reference::find_by_id::<T, _>(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: T::ENTITY,
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<Created<Student>> {
    let input = CreateStudent {
        name: validate_name("name", &input.name)?,
        student_number: input.student_number,
    };
    validate_student_number(input.student_number)?;

    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = student.id, "Student created");
    created(student)
}

/// GET /api/v1/students/by-number/{number}
pub async fn get_student_by_number(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> AppResult<Json<DataResponse<Student>>> {
    let student = StudentRepo::find_by_number(&state.pool, number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: number,
        }))?;
    Ok(Json(DataResponse { data: student }))
}

// ---------------------------------------------------------------------------
// Name-only entities
// ---------------------------------------------------------------------------

/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<Created<Location>> {
    let input = CreateLocation {
        name: validate_name("name", &input.name)?,
    };
    ensure_name_free::<LocationRepo>(&state, &input.name).await?;
    created(LocationRepo::create(&state.pool, &input).await?)
}

/// POST /api/v1/supervisors
pub async fn create_supervisor(
    State(state): State<AppState>,
    Json(input): Json<CreateSupervisor>,
) -> AppResult<Created<Supervisor>> {
    let input = CreateSupervisor {
        name: validate_name("name", &input.name)?,
    };
    ensure_name_free::<SupervisorRepo>(&state, &input.name).await?;
    created(SupervisorRepo::create(&state.pool, &input).await?)
}

/// POST /api/v1/activities
pub async fn create_activity(
    State(state): State<AppState>,
    Json(input): Json<CreateActivity>,
) -> AppResult<Created<Activity>> {
    let input = CreateActivity {
        name: validate_name("name", &input.name)?,
    };
    ensure_name_free::<ActivityRepo>(&state, &input.name).await?;
    created(ActivityRepo::create(&state.pool, &input).await?)
}

// ---------------------------------------------------------------------------
// Domains and units
// ---------------------------------------------------------------------------

/// POST /api/v1/domains
pub async fn create_domain(
    State(state): State<AppState>,
    Json(input): Json<CreateDomain>,
) -> AppResult<Created<Domain>> {
    let input = CreateDomain {
        name: validate_name("name", &input.name)?,
        is_core: input.is_core,
    };
    ensure_name_free::<DomainRepo>(&state, &input.name).await?;
    created(DomainRepo::create(&state.pool, &input).await?)
}

/// POST /api/v1/units
pub async fn create_unit(
    State(state): State<AppState>,
    Json(input): Json<CreateUnit>,
) -> AppResult<Created<Unit>> {
    validate_required_minutes(input.required_minutes)?;
    let input = CreateUnit {
        name: validate_name("name", &input.name)?,
        required_minutes: input.required_minutes,
    };
    ensure_name_free::<UnitRepo>(&state, &input.name).await?;
    created(UnitRepo::create(&state.pool, &input).await?)
}
