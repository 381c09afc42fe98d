//! Handlers for the `/activity-logs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use placement_core::error::CoreError;
use placement_core::types::DbId;
use placement_core::validation::{validate_minutes_spent, validate_response_id};
use placement_db::models::activity_log::{ActivityLog, CreateActivityLog, UpdateActivityLog};
use placement_db::repositories::ActivityLogRepo;

use crate::error::{AppError, AppResult};
use crate::query::LogListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ActivityLog",
        id,
    })
}

/// POST /api/v1/activity-logs
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateActivityLog>,
) -> AppResult<(StatusCode, Json<DataResponse<ActivityLog>>)> {
    validate_minutes_spent(input.minutes_spent)?;
    validate_response_id(input.response_id.as_deref())?;

    let log = ActivityLogRepo::create(&state.pool, &input).await?;
    tracing::info!(
        log_id = log.id,
        student_id = log.student_id,
        minutes = log.minutes_spent,
        "Activity log created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/activity-logs
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LogListParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityLog>>>> {
    let filters = params.filters()?;
    let logs = ActivityLogRepo::list(&state.pool, &filters, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/activity-logs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActivityLog>>> {
    let log = ActivityLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: log }))
}

/// PUT /api/v1/activity-logs/{id}
///
/// Applies the present fields and marks the log as edited.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivityLog>,
) -> AppResult<Json<DataResponse<ActivityLog>>> {
    if let Some(minutes) = input.minutes_spent {
        validate_minutes_spent(minutes)?;
    }

    let log = ActivityLogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(log_id = log.id, "Activity log edited");
    Ok(Json(DataResponse { data: log }))
}
