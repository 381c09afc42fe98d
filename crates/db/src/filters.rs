//! Translate [`LogFilter`]s into SQL predicates.

use placement_core::filters::LogFilter;
use sqlx::{Postgres, QueryBuilder};

/// Append one `AND ...` predicate per filter, referencing `activity_logs`
/// through `alias`.
///
/// The caller's SQL must already be positioned after a `WHERE` (or join
/// `ON`) clause that the predicates can extend, e.g. `WHERE TRUE`.
pub fn push_log_filters(qb: &mut QueryBuilder<'_, Postgres>, alias: &str, filters: &[LogFilter]) {
    for filter in filters {
        match *filter {
            LogFilter::Year(_) | LogFilter::DateRange { .. } => match filter.date_bounds() {
                Some((from, to)) => {
                    qb.push(format!(" AND {alias}.record_date BETWEEN "));
                    qb.push_bind(from);
                    qb.push(" AND ");
                    qb.push_bind(to);
                }
                // A year chrono cannot represent matches no logs.
                None => {
                    qb.push(" AND FALSE");
                }
            },
            LogFilter::Location(id) => {
                qb.push(format!(" AND {alias}.location_id = "));
                qb.push_bind(id);
            }
            LogFilter::Student(id) => {
                qb.push(format!(" AND {alias}.student_id = "));
                qb.push_bind(id);
            }
            LogFilter::Supervisor(id) => {
                qb.push(format!(" AND {alias}.supervisor_id = "));
                qb.push_bind(id);
            }
            LogFilter::Unit(id) => {
                qb.push(format!(" AND {alias}.unit_id = "));
                qb.push_bind(id);
            }
        }
    }
}
