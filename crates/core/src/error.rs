//! Domain errors shared by the database, HTTP and import layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A report or lookup named a reference row that does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected input: blank names, negative minutes, bad date ranges.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A natural key (reference name) is already taken.
    #[error("Already exists: {0}")]
    Conflict(String),
}
