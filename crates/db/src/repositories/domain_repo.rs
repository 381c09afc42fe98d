//! Repository for the `domains` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::domain::{CreateDomain, Domain};
use crate::repositories::reference::{self, ReferenceTable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, is_core, created_at, updated_at";

/// Provides lookup and creation for domains.
pub struct DomainRepo;

impl ReferenceTable for DomainRepo {
    type Row = Domain;
    const ENTITY: &'static str = "Domain";
    const TABLE: &'static str = "domains";
    const COLUMNS: &'static str = COLUMNS;

    fn row_id(row: &Domain) -> DbId {
        row.id
    }
}

impl DomainRepo {
    /// Insert a new domain, returning the created row.
    ///
    /// If `is_core` is `None` in the input, defaults to `false`.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateDomain,
    ) -> Result<Domain, sqlx::Error> {
        let query = format!(
            "INSERT INTO domains (name, is_core) VALUES ($1, COALESCE($2, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Domain>(&query)
            .bind(&input.name)
            .bind(input.is_core)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Domain>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    /// List all domains ordered by ID. This order defines report row order.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Domain>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
