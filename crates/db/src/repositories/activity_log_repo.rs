//! Repository for the `activity_logs` fact table.

use placement_core::filters::LogFilter;
use placement_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::filters::push_log_filters;
use crate::models::activity_log::{ActivityLog, CreateActivityLog, UpdateActivityLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, location_id, supervisor_id, activity_id, domain_id, \
                       unit_id, minutes_spent, record_date, response_id, is_edited, \
                       created_at, updated_at";

/// Page size used when the caller does not pass a limit.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Largest page size a caller may request.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Provides CRUD operations for activity logs.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Insert a new activity log, returning the created row.
    ///
    /// Takes any executor so the importer can insert inside its
    /// per-response transaction.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs
                (student_id, location_id, supervisor_id, activity_id, domain_id,
                 unit_id, minutes_spent, record_date, response_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.student_id)
            .bind(input.location_id)
            .bind(input.supervisor_id)
            .bind(input.activity_id)
            .bind(input.domain_id)
            .bind(input.unit_id)
            .bind(input.minutes_spent)
            .bind(input.record_date)
            .bind(&input.response_id)
            .fetch_one(executor)
            .await
    }

    /// Find an activity log by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activity_logs WHERE id = $1");
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List logs matching every filter, newest service date first.
    ///
    /// `limit` defaults to [`DEFAULT_LIST_LIMIT`] and is clamped to
    /// `1..=MAX_LIST_LIMIT`; a negative `offset` is treated as zero.
    pub async fn list(
        pool: &PgPool,
        filters: &[LogFilter],
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM activity_logs l WHERE TRUE"
        ));
        push_log_filters(&mut qb, "l", filters);
        qb.push(" ORDER BY l.record_date DESC, l.id DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        qb.build_query_as::<ActivityLog>().fetch_all(pool).await
    }

    /// Update an activity log. Only non-`None` fields in `input` are applied,
    /// and the row is flagged as edited. `unit_id: Some(None)` detaches the
    /// log from its unit.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivityLog,
    ) -> Result<Option<ActivityLog>, sqlx::Error> {
        let query = format!(
            "UPDATE activity_logs SET
                student_id = COALESCE($2, student_id),
                location_id = COALESCE($3, location_id),
                supervisor_id = COALESCE($4, supervisor_id),
                activity_id = COALESCE($5, activity_id),
                domain_id = COALESCE($6, domain_id),
                unit_id = CASE WHEN $10 THEN $7 ELSE unit_id END,
                minutes_spent = COALESCE($8, minutes_spent),
                record_date = COALESCE($9, record_date),
                is_edited = TRUE,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(id)
            .bind(input.student_id)
            .bind(input.location_id)
            .bind(input.supervisor_id)
            .bind(input.activity_id)
            .bind(input.domain_id)
            .bind(input.unit_id.flatten())
            .bind(input.minutes_spent)
            .bind(input.record_date)
            .bind(input.unit_id.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Whether any log was already imported from the given survey response.
    pub async fn exists_for_response<'e, E: PgExecutor<'e>>(
        executor: E,
        response_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM activity_logs WHERE response_id = $1)",
        )
        .bind(response_id)
        .fetch_one(executor)
        .await
    }
}
