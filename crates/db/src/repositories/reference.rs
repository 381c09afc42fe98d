//! Shared queries for the six reference tables.
//!
//! Students, locations, supervisors, activities, domains and units all have
//! a surrogate `id` and a `name` natural key. Each repository describes its
//! table through [`ReferenceTable`]; the generic functions here implement
//! lookup, listing, and get-or-create once for all of them.

use placement_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgExecutor};

/// Static description of a reference table.
pub trait ReferenceTable {
    /// Row struct returned by every query on this table.
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// Entity name used in errors and log messages.
    const ENTITY: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// Column list shared across queries.
    const COLUMNS: &'static str;

    /// Surrogate key of a row.
    fn row_id(row: &Self::Row) -> DbId;
}

/// Find a row by its internal ID.
pub async fn find_by_id<'e, T, E>(executor: E, id: DbId) -> Result<Option<T::Row>, sqlx::Error>
where
    T: ReferenceTable,
    E: PgExecutor<'e>,
{
    let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
    sqlx::query_as::<_, T::Row>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Find every row whose name equals `name` exactly, ordered by ID.
pub async fn find_by_name<'e, T, E>(executor: E, name: &str) -> Result<Vec<T::Row>, sqlx::Error>
where
    T: ReferenceTable,
    E: PgExecutor<'e>,
{
    let query = format!(
        "SELECT {} FROM {} WHERE name = $1 ORDER BY id",
        T::COLUMNS,
        T::TABLE
    );
    sqlx::query_as::<_, T::Row>(&query)
        .bind(name)
        .fetch_all(executor)
        .await
}

/// List every row ordered by ID. Report columns and rows rely on this order.
pub async fn list_all<'e, T, E>(executor: E) -> Result<Vec<T::Row>, sqlx::Error>
where
    T: ReferenceTable,
    E: PgExecutor<'e>,
{
    let query = format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE);
    sqlx::query_as::<_, T::Row>(&query).fetch_all(executor).await
}

/// Insert a row with only its name set; every other column takes its default.
pub async fn insert_by_name<'e, T, E>(executor: E, name: &str) -> Result<T::Row, sqlx::Error>
where
    T: ReferenceTable,
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO {} (name) VALUES ($1) RETURNING {}",
        T::TABLE,
        T::COLUMNS
    );
    sqlx::query_as::<_, T::Row>(&query)
        .bind(name)
        .fetch_one(executor)
        .await
}

// ---------------------------------------------------------------------------
// Get-or-create
// ---------------------------------------------------------------------------

/// Failure to resolve a natural key to a single row.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{count} {entity} rows are named {name:?}; refusing to guess")]
    Ambiguous {
        entity: &'static str,
        name: String,
        count: usize,
    },
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone)]
pub struct Resolved<R> {
    pub row: R,
    /// `true` if the row was inserted by this call.
    pub created: bool,
}

/// Return the single row named `name`, creating it if none exists.
///
/// Matching is exact string equality. More than one existing match is an
/// error. Runs on the caller's connection so that the lookup and insert
/// share the caller's transaction.
pub async fn resolve<T>(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Resolved<T::Row>, ResolveError>
where
    T: ReferenceTable,
{
    let mut matches = find_by_name::<T, _>(&mut *conn, name).await?;
    match matches.len() {
        0 => {
            let row = insert_by_name::<T, _>(&mut *conn, name).await?;
            tracing::debug!(entity = T::ENTITY, name, "Created reference row");
            Ok(Resolved { row, created: true })
        }
        1 => Ok(Resolved {
            row: matches.swap_remove(0),
            created: false,
        }),
        count => Err(ResolveError::Ambiguous {
            entity: T::ENTITY,
            name: name.to_string(),
            count,
        }),
    }
}
