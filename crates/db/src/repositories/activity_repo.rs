//! Repository for the `activities` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::activity::{CreateActivity, Activity};
use crate::repositories::reference::{self, ReferenceTable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides lookup and creation for activity categories.
pub struct ActivityRepo;

impl ReferenceTable for ActivityRepo {
    type Row = Activity;
    const ENTITY: &'static str = "Activity";
    const TABLE: &'static str = "activities";
    const COLUMNS: &'static str = COLUMNS;

    fn row_id(row: &Activity) -> DbId {
        row.id
    }
}

impl ActivityRepo {
    /// Insert a new activity category, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        reference::insert_by_name::<Self, _>(executor, &input.name).await
    }

    /// Find a activity by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    /// List all activity categories ordered by ID.
    ///
    /// This order defines the column order of every report.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Activity>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
