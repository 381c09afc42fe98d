//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /cohort                          -> cohort
/// GET    /locations/{id}                  -> location
/// GET    /students/{id}                   -> student
/// GET    /students/by-number/{number}     -> student_by_number
/// ```
///
/// Every route accepts an optional `?year=`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cohort", get(reports::cohort))
        .route("/locations/{id}", get(reports::location))
        .route("/students/{id}", get(reports::student))
        .route(
            "/students/by-number/{number}",
            get(reports::student_by_number),
        )
}
