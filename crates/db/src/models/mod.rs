//! Row structs and DTOs.
//!
//! One module per table: a `FromRow` row and a `Create*` input. Activity
//! logs also have an all-`Option` update input. `aggregate` holds the rows
//! of the grouped report queries.

pub mod activity;
pub mod activity_log;
pub mod aggregate;
pub mod domain;
pub mod location;
pub mod student;
pub mod supervisor;
pub mod unit;
