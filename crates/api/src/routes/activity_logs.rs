//! Route definitions for the `/activity-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity_logs;
use crate::state::AppState;

/// Routes mounted at `/activity-logs`.
///
/// ```text
/// GET    /        -> list (?student_id=&location_id=&supervisor_id=&unit_id=
///                          &year=&from=&to=&limit=&offset=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activity_logs::list).post(activity_logs::create))
        .route(
            "/{id}",
            get(activity_logs::get_by_id).put(activity_logs::update),
        )
}
