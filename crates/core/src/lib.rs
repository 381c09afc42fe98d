//! Domain logic for the placement activity log service.
//!
//! Nothing in this crate touches the database. Repositories in
//! `placement-db` load plain rows and hand them to the functions here.

pub mod error;
pub mod filters;
pub mod pivot;
pub mod report;
pub mod survey;
pub mod types;
pub mod validation;
