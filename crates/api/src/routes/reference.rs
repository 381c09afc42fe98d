//! Route definitions for the reference resources.

use axum::routing::get;
use axum::Router;
use placement_db::repositories::{
    ActivityRepo, DomainRepo, LocationRepo, StudentRepo, SupervisorRepo, UnitRepo,
};

use crate::handlers::reference;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create_student
/// GET    /{id}                   -> get_by_id
/// GET    /by-number/{number}     -> get_student_by_number
/// ```
pub fn students() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<StudentRepo>).post(reference::create_student),
        )
        .route("/{id}", get(reference::get_by_id::<StudentRepo>))
        .route("/by-number/{number}", get(reference::get_student_by_number))
}

/// Routes mounted at `/locations`.
pub fn locations() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<LocationRepo>).post(reference::create_location),
        )
        .route("/{id}", get(reference::get_by_id::<LocationRepo>))
}

/// Routes mounted at `/supervisors`.
pub fn supervisors() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<SupervisorRepo>).post(reference::create_supervisor),
        )
        .route("/{id}", get(reference::get_by_id::<SupervisorRepo>))
}

/// Routes mounted at `/activities`.
pub fn activities() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<ActivityRepo>).post(reference::create_activity),
        )
        .route("/{id}", get(reference::get_by_id::<ActivityRepo>))
}

/// Routes mounted at `/domains`.
pub fn domains() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<DomainRepo>).post(reference::create_domain),
        )
        .route("/{id}", get(reference::get_by_id::<DomainRepo>))
}

/// Routes mounted at `/units`.
pub fn units() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reference::list::<UnitRepo>).post(reference::create_unit),
        )
        .route("/{id}", get(reference::get_by_id::<UnitRepo>))
}
