//! Repository for the `locations` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::location::{CreateLocation, Location};
use crate::repositories::reference::{self, ReferenceTable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides lookup and creation for locations.
pub struct LocationRepo;

impl ReferenceTable for LocationRepo {
    type Row = Location;
    const ENTITY: &'static str = "Location";
    const TABLE: &'static str = "locations";
    const COLUMNS: &'static str = COLUMNS;

    fn row_id(row: &Location) -> DbId {
        row.id
    }
}

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        reference::insert_by_name::<Self, _>(executor, &input.name).await
    }

    /// Find a location by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    /// List all locations ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Location>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
