//! Repository for the `supervisors` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::supervisor::{CreateSupervisor, Supervisor};
use crate::repositories::reference::{self, ReferenceTable};

/// Provides lookup and creation for supervisors.
pub struct SupervisorRepo;

impl ReferenceTable for SupervisorRepo {
    type Row = Supervisor;
    const ENTITY: &'static str = "Supervisor";
    const TABLE: &'static str = "supervisors";
    const COLUMNS: &'static str = "id, name, created_at, updated_at";

    fn row_id(row: &Supervisor) -> DbId {
        row.id
    }
}

impl SupervisorRepo {
    /// Insert a new supervisor, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateSupervisor,
    ) -> Result<Supervisor, sqlx::Error> {
        reference::insert_by_name::<Self, _>(executor, &input.name).await
    }

    /// Find a supervisor by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Supervisor>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    /// List all supervisors ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Supervisor>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
