//! Repository for the `units` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::unit::{CreateUnit, Unit};
use crate::repositories::reference::{self, ReferenceTable};

const COLUMNS: &str = "id, name, required_minutes, created_at, updated_at";

/// Provides lookup and creation for units.
pub struct UnitRepo;

impl ReferenceTable for UnitRepo {
    type Row = Unit;
    const ENTITY: &'static str = "Unit";
    const TABLE: &'static str = "units";
    const COLUMNS: &'static str = COLUMNS;

    fn row_id(row: &Unit) -> DbId {
        row.id
    }
}

impl UnitRepo {
    /// Insert a new unit, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateUnit,
    ) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (name, required_minutes) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(&input.name)
            .bind(input.required_minutes)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Unit>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Unit>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
