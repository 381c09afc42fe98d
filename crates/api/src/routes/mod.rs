pub mod activity_logs;
pub mod health;
pub mod reference;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                                list, create
/// /students/{id}                           get
/// /students/by-number/{number}             get by student number
/// /locations, /supervisors, /activities,
/// /domains, /units                         list, create
/// /{resource}/{id}                         get
///
/// /activity-logs                           list (filtered, paginated), create
/// /activity-logs/{id}                      get, update
///
/// /reports/cohort                          cohort report (?year=)
/// /reports/locations/{id}                  location report (?year=)
/// /reports/students/{id}                   student report (?year=)
/// /reports/students/by-number/{number}     student report by number (?year=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", reference::students())
        .nest("/locations", reference::locations())
        .nest("/supervisors", reference::supervisors())
        .nest("/activities", reference::activities())
        .nest("/domains", reference::domains())
        .nest("/units", reference::units())
        .nest("/activity-logs", activity_logs::router())
        .nest("/reports", reports::router())
}
