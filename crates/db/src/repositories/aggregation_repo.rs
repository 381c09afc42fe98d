//! Read-only aggregation queries behind the reports.
//!
//! Every function here sums `minutes_spent` over the logs selected by a
//! slice of [`LogFilter`]s (AND-combined). Nothing is cached; each call
//! reads current data. A report runs all of its reads on one connection
//! inside [`AggregationRepo::begin_snapshot`] so its sections agree.

use placement_core::filters::LogFilter;
use placement_core::pivot::{build_pivot, ActivityColumn, DomainInfo, MinuteCell, PivotTable};
use placement_core::report::{SupervisorHours, UnitProgress};
use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder, Transaction};

use crate::filters::push_log_filters;
use crate::models::aggregate::{DomainActivityMinutes, SupervisorMinutes, UnitMinutes};
use crate::repositories::{ActivityRepo, DomainRepo};

/// Provides the report aggregations.
pub struct AggregationRepo;

impl AggregationRepo {
    /// Open a read-only `REPEATABLE READ` transaction.
    ///
    /// Every query run on it sees the same snapshot, so a log inserted
    /// mid-report cannot show up in one section and not another.
    pub async fn begin_snapshot(
        pool: &PgPool,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Domain × activity minute pivot for the filtered logs.
    ///
    /// Every domain gets a row and every activity a column, even with no
    /// matching logs. Run it on a [`begin_snapshot`](Self::begin_snapshot)
    /// transaction so the reference lists and the grouped sum agree.
    pub async fn domain_activity_pivot(
        conn: &mut PgConnection,
        filters: &[LogFilter],
    ) -> Result<PivotTable, sqlx::Error> {
        let domains: Vec<DomainInfo> = DomainRepo::list(&mut *conn)
            .await?
            .iter()
            .map(DomainInfo::from)
            .collect();
        let activities: Vec<ActivityColumn> = ActivityRepo::list(&mut *conn)
            .await?
            .iter()
            .map(ActivityColumn::from)
            .collect();

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT l.domain_id, l.activity_id, SUM(l.minutes_spent)::BIGINT AS minutes \
             FROM activity_logs l WHERE TRUE",
        );
        push_log_filters(&mut qb, "l", filters);
        qb.push(" GROUP BY l.domain_id, l.activity_id");
        let cells: Vec<MinuteCell> = qb
            .build_query_as::<DomainActivityMinutes>()
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(MinuteCell::from)
            .collect();

        tracing::debug!(
            domains = domains.len(),
            activities = activities.len(),
            cells = cells.len(),
            "Built domain/activity pivot",
        );
        Ok(build_pivot(&domains, &activities, &cells))
    }

    /// Minutes logged under each supervisor, ordered by supervisor ID.
    ///
    /// Only supervisors with at least one matching log appear.
    pub async fn supervisor_hours<'e, E: PgExecutor<'e>>(
        executor: E,
        filters: &[LogFilter],
    ) -> Result<Vec<SupervisorHours>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT s.id AS supervisor_id, s.name AS supervisor, \
                    SUM(l.minutes_spent)::BIGINT AS minutes \
             FROM activity_logs l \
             JOIN supervisors s ON s.id = l.supervisor_id \
             WHERE TRUE",
        );
        push_log_filters(&mut qb, "l", filters);
        qb.push(" GROUP BY s.id, s.name ORDER BY s.id");

        let rows = qb
            .build_query_as::<SupervisorMinutes>()
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(SupervisorHours::from).collect())
    }

    /// Minutes logged against every unit, ordered by unit ID.
    ///
    /// Units with no matching logs report zero. Logs without a unit are not
    /// counted.
    pub async fn unit_progress<'e, E: PgExecutor<'e>>(
        executor: E,
        filters: &[LogFilter],
    ) -> Result<Vec<UnitProgress>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT u.id AS unit_id, u.name AS unit, u.required_minutes, \
                    COALESCE(SUM(l.minutes_spent), 0)::BIGINT AS minutes \
             FROM units u \
             LEFT JOIN activity_logs l ON l.unit_id = u.id",
        );
        // Filters go in the join condition so unmatched units survive.
        push_log_filters(&mut qb, "l", filters);
        qb.push(" GROUP BY u.id, u.name, u.required_minutes ORDER BY u.id");

        let rows = qb.build_query_as::<UnitMinutes>().fetch_all(executor).await?;
        Ok(rows.into_iter().map(UnitProgress::from).collect())
    }
}
